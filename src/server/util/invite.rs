use rand::Rng;

/// Length of a server invite code.
pub const INVITE_CODE_LENGTH: usize = 10;

/// Generates a random invite code.
///
/// Code consists of uppercase letters (A-Z), lowercase letters (a-z), and digits (0-9).
pub fn generate_invite_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
