//! Spinner and idle chatter for the loading screen and the waiting line.

use std::time::{SystemTime, UNIX_EPOCH};

/// Braille spinner characters for animated loading indicators.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Shown while the line sits in the water.
const WAITING_MESSAGES: [&str; 12] = [
    "The bobber drifts...",
    "Ripples spread out...",
    "Something circles below...",
    "Patience, angler...",
    "A shadow passes...",
    "The line twitches...",
    "Quiet water...",
    "Bubbles rise...",
    "Hold steady...",
    "The current tugs...",
    "Fish are curious today...",
    "Wait for it...",
];

fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Returns the current spinner character based on system time.
/// The spinner cycles every 100ms, completing a full rotation every second.
pub fn spinner_char() -> char {
    let millis = current_millis();
    SPINNER[((millis / 100) % 10) as usize]
}

/// Stable for the same seed.
pub fn waiting_message(seed: u64) -> &'static str {
    WAITING_MESSAGES[(seed.wrapping_mul(7) as usize) % WAITING_MESSAGES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_message_is_stable() {
        assert_eq!(waiting_message(3), waiting_message(3));
        assert!(WAITING_MESSAGES.contains(&waiting_message(u64::MAX)));
    }

    #[test]
    fn test_spinner_char_is_braille() {
        assert!(SPINNER.contains(&spinner_char()));
    }
}
