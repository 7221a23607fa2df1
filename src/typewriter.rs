//! Character-by-character typing and deleting over a rotating phrase list.

use crate::config::TypewriterTiming;

/// What the caller should do after a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// New text for the display element. `None` on the hold tick, where the
    /// display is left as it was.
    pub text: Option<String>,
    pub next_delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    /// Returns `None` when there is nothing to type. Empty phrases are
    /// skipped since they could never reach their own length.
    pub fn new(phrases: Vec<String>, timing: TypewriterTiming) -> Option<Self> {
        let phrases: Vec<String> = phrases.into_iter().filter(|p| !p.is_empty()).collect();
        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            timing,
            phrase_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.timing.start_delay_ms
    }

    pub fn tick(&mut self) -> Tick {
        let phrase_index = self.phrase_index;
        let length = self.phrases[phrase_index].chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            if self.char_index == 0 {
                self.deleting = false;
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            }
        } else {
            self.char_index = (self.char_index + 1).min(length);
            if self.char_index == length {
                self.deleting = true;
                return Tick {
                    text: None,
                    next_delay_ms: self.timing.hold_delay_ms,
                };
            }
        }

        let next_delay_ms = if self.deleting {
            self.timing.delete_delay_ms
        } else {
            self.timing.type_delay_ms
        };

        Tick {
            text: Some(prefix(&self.phrases[phrase_index], self.char_index)),
            next_delay_ms,
        }
    }
}

fn prefix(phrase: &str, chars: usize) -> String {
    phrase.chars().take(chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Typewriter {
        fn phrase_index(&self) -> usize {
            self.phrase_index
        }

        fn char_index(&self) -> usize {
            self.char_index
        }

        fn is_deleting(&self) -> bool {
            self.deleting
        }

        fn current_phrase(&self) -> &str {
            &self.phrases[self.phrase_index]
        }

        fn typed(&self) -> String {
            prefix(self.current_phrase(), self.char_index)
        }
    }

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(
            phrases.iter().map(|p| p.to_string()).collect(),
            TypewriterTiming::default(),
        )
        .expect("non-empty phrase list")
    }

    #[test]
    fn hi_yo_scenario() {
        let mut tw = writer(&["Hi", "Yo"]);

        let first = tw.tick();
        assert_eq!(first.text.as_deref(), Some("H"));
        assert_eq!(first.next_delay_ms, 70);

        let hold = tw.tick();
        assert_eq!(tw.typed(), "Hi");
        assert!(tw.is_deleting());
        assert_eq!(hold, Tick { text: None, next_delay_ms: 1_200 });

        let back = tw.tick();
        assert_eq!(back.text.as_deref(), Some("H"));
        assert_eq!(back.next_delay_ms, 40);

        let cleared = tw.tick();
        assert_eq!(cleared.text.as_deref(), Some(""));
        assert_eq!(cleared.next_delay_ms, 70);
        assert!(!tw.is_deleting());
        assert_eq!(tw.current_phrase(), "Yo");

        let next = tw.tick();
        assert_eq!(next.text.as_deref(), Some("Y"));
    }

    #[test]
    fn char_index_stays_within_phrase_bounds() {
        let mut tw = writer(&["Rust", "é✓", "a"]);

        for _ in 0..500 {
            let before = tw.current_phrase().chars().count();
            let was_deleting = tw.is_deleting();
            tw.tick();

            assert!(tw.char_index() <= tw.current_phrase().chars().count());
            if tw.is_deleting() {
                assert!(tw.char_index() > 0);
                assert!(tw.char_index() <= before);
            }
            if was_deleting && !tw.is_deleting() {
                assert_eq!(tw.char_index(), 0);
            }
        }
    }

    #[test]
    fn phrases_rotate_and_wrap() {
        let mut tw = writer(&["ab", "c", "de"]);
        let mut seen = vec![tw.phrase_index()];

        for _ in 0..40 {
            let before = tw.phrase_index();
            tw.tick();
            if tw.phrase_index() != before {
                assert_eq!(tw.phrase_index(), (before + 1) % 3);
                seen.push(tw.phrase_index());
            }
        }

        assert_eq!(&seen[..4], &[0, 1, 2, 0]);
    }

    #[test]
    fn single_character_phrase_holds_immediately() {
        let mut tw = writer(&["x"]);
        assert_eq!(tw.tick().text, None);
        assert_eq!(tw.tick().text.as_deref(), Some(""));
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn multibyte_phrases_slice_on_characters() {
        let mut tw = writer(&["héllo"]);
        tw.tick();
        assert_eq!(tw.tick().text.as_deref(), Some("hé"));
    }

    #[test]
    fn empty_input_has_no_typewriter() {
        assert!(Typewriter::new(Vec::new(), TypewriterTiming::default()).is_none());
        assert!(Typewriter::new(vec![String::new()], TypewriterTiming::default()).is_none());
    }
}
