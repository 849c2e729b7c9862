//! Human id generation

use rand::Rng;

use groupbot_shared::constants::HID_LENGTH;

/// Random lowercase id such as `exmpl`. Uniqueness is the caller's problem.
pub fn generate_hid() -> String {
    let mut rng = rand::rng();
    (0..HID_LENGTH)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}
