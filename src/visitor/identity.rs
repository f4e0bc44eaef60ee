use super::types::VisitorAttributes;

/// Derive a short, URL-safe visitor identifier from the fingerprint fields.
///
/// Absent fields are dropped rather than stringified. This is a correlation
/// key, not a credential; collisions are expected at scale.
pub fn visitor_id(attrs: &VisitorAttributes) -> String {
    let parts = [
        attrs.fingerprint_id.clone(),
        attrs.canvas_fingerprint.as_deref().map(|s| utf16_prefix(s, 20)),
        attrs.audio_fingerprint.clone(),
        attrs.screen_resolution.clone(),
        attrs.user_agent.as_deref().map(|s| utf16_prefix(s, 50)),
    ];

    let fingerprint = parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    to_base36(hash_string(&fingerprint).unsigned_abs() as u64)
}

/// Rolling `h * 31 + unit` hash over UTF-16 code units, wrapped to i32.
pub fn hash_string(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32)
    })
}

fn utf16_prefix(s: &str, units: usize) -> String {
    let prefix: Vec<u16> = s.encode_utf16().take(units).collect();
    String::from_utf16_lossy(&prefix)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
