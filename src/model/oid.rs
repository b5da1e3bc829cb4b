//! Dotted-decimal object identifiers.

/// `numericoid = number 1*( DOT number )`, where the first arc is 0, 1 or 2
/// and no arc carries a leading zero.
pub fn is_valid_oid(oid: &str) -> bool {
    let mut arcs = oid.split('.');

    let Some(first) = arcs.next() else {
        return false;
    };
    if !matches!(first, "0" | "1" | "2") {
        return false;
    }

    let mut count = 1;
    for arc in arcs {
        if !is_number(arc) {
            return false;
        }
        count += 1;
    }

    count >= 2
}

fn is_number(arc: &str) -> bool {
    match arc.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        digits => digits.iter().all(u8::is_ascii_digit),
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
