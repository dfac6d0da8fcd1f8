// libs/scheduling-cell/src/services/ids.rs
use rand::Rng;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const ID_LEN: usize = 8;

/// Short random identifier, uppercase letters and digits. Uniqueness against
/// existing rows is the store's job; see `ScheduleStore::fresh_id`.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}
