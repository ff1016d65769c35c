//! Cycling typewriter text under the hero headline

use std::time::Duration;

pub const PHRASES: [&str; 4] = [
    "Start Small. Scale Smart.",
    "AI-Integrated Data Products.",
    "Research That Drives Real Impact.",
    "Where Data Meets Intelligence.",
];

const TYPE_DELAY: Duration = Duration::from_millis(70);
const DELETE_DELAY: Duration = Duration::from_millis(40);
const HOLD_DELAY: Duration = Duration::from_millis(1600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
}

/// Types a phrase one character at a time, holds it, deletes it, then moves
/// on to the next phrase
pub struct Typewriter {
    phrases: &'static [&'static str],
    index: usize,
    shown: usize,
    phase: TypewriterPhase,
    elapsed: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(&PHRASES)
    }
}

impl Typewriter {
    pub fn new(phrases: &'static [&'static str]) -> Self {
        Self {
            phrases,
            index: 0,
            shown: 0,
            phase: TypewriterPhase::Typing,
            elapsed: Duration::ZERO,
        }
    }

    fn delay(&self) -> Duration {
        match self.phase {
            TypewriterPhase::Typing => TYPE_DELAY,
            TypewriterPhase::Holding => HOLD_DELAY,
            TypewriterPhase::Deleting => DELETE_DELAY,
        }
    }

    fn phrase(&self) -> &'static str {
        self.phrases.get(self.index).copied().unwrap_or("")
    }

    /// Advance by `dt`, taking as many steps as fit
    pub fn advance(&mut self, dt: Duration) {
        if self.phrases.is_empty() {
            return;
        }

        self.elapsed += dt;
        loop {
            let delay = self.delay();
            if self.elapsed < delay {
                break;
            }
            self.elapsed -= delay;
            self.step();
        }
    }

    fn step(&mut self) {
        let len = self.phrase().chars().count();
        match self.phase {
            TypewriterPhase::Typing if self.shown < len => self.shown += 1,
            TypewriterPhase::Typing => self.phase = TypewriterPhase::Holding,
            TypewriterPhase::Holding => self.phase = TypewriterPhase::Deleting,
            TypewriterPhase::Deleting if self.shown > 0 => self.shown -= 1,
            TypewriterPhase::Deleting => {
                self.phase = TypewriterPhase::Typing;
                self.index = (self.index + 1) % self.phrases.len();
            }
        }
    }

    /// The visible prefix of the current phrase
    pub fn text(&self) -> &'static str {
        let phrase = self.phrase();
        match phrase.char_indices().nth(self.shown) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_types_one_char_per_delay() {
        let mut typewriter = Typewriter::default();
        assert_eq!(typewriter.text(), "");

        typewriter.advance(ms(69));
        assert_eq!(typewriter.text(), "");
        typewriter.advance(ms(1));
        assert_eq!(typewriter.text(), "S");
        typewriter.advance(ms(140));
        assert_eq!(typewriter.text(), "Sta");
    }

    #[test]
    fn test_full_cycle_moves_to_next_phrase() {
        let mut typewriter = Typewriter::default();
        let len = PHRASES[0].len() as u64;

        typewriter.advance(ms(70 * len));
        assert_eq!(typewriter.text(), PHRASES[0]);
        assert_eq!(typewriter.phase(), TypewriterPhase::Typing);

        // One more tick notices the phrase is complete, then the hold runs.
        typewriter.advance(ms(70));
        assert_eq!(typewriter.phase(), TypewriterPhase::Holding);
        typewriter.advance(ms(1599));
        assert_eq!(typewriter.phase(), TypewriterPhase::Holding);
        typewriter.advance(ms(1));
        assert_eq!(typewriter.phase(), TypewriterPhase::Deleting);
        assert_eq!(typewriter.text(), PHRASES[0]);

        typewriter.advance(ms(40));
        assert_eq!(typewriter.text(), &PHRASES[0][..PHRASES[0].len() - 1]);

        typewriter.advance(ms(40 * len));
        assert_eq!(typewriter.text(), "");
        assert_eq!(typewriter.phrase_index(), 1);
        assert_eq!(typewriter.phase(), TypewriterPhase::Typing);

        typewriter.advance(ms(70));
        assert_eq!(typewriter.text(), "A");
    }

    #[test]
    fn test_wraps_after_last_phrase() {
        static TWO: [&str; 2] = ["ab", "c"];
        let mut typewriter = Typewriter::new(&TWO);

        // "ab": 3 typing ticks, hold, 3 deleting ticks
        typewriter.advance(ms(3 * 70 + 1600 + 3 * 40));
        assert_eq!(typewriter.phrase_index(), 1);
        // "c": 2 typing ticks, hold, 2 deleting ticks
        typewriter.advance(ms(2 * 70 + 1600 + 2 * 40));
        assert_eq!(typewriter.phrase_index(), 0);
    }

    #[test]
    fn test_empty_phrase_list_stays_blank() {
        static NONE: [&str; 0] = [];
        let mut typewriter = Typewriter::new(&NONE);
        typewriter.advance(ms(10_000));
        assert_eq!(typewriter.text(), "");
    }
}
