// Debug-only formatting, split out of `bigint.rs` so the algorithmic core
// never has a reason to import it. Nothing here participates in the
// arithmetic; it exists purely so a failing test or a `{:?}` in a debugger
// session can read a `BigInt` back as hex.

use crate::bigint::BigInt;

/// Renders a `BigInt` as `[-]0x` followed by its chunks, most-significant
/// first, each as 8 hex digits, space-separated. This is a diagnostic
/// format only: nothing in the crate parses it back.
pub fn print(v: &BigInt) -> String {
    let mut s = String::new();
    if v.sign() == 1 {
        s.push('-');
    }
    s.push_str("0x");
    let size = v.size();
    for i in (0..size).rev() {
        if i != size - 1 {
            s.push(' ');
        }
        s.push_str(&format!("{:08X}", v.chunk(i)));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn prints_sign_and_chunks_msb_first() {
        let a = BigInt::from_double_chunk((1u64 << 32) | 2, 1);
        assert_eq!(print(&a), "-0x00000001 00000002");
    }

    #[test]
    fn prints_positive_single_chunk() {
        let a = BigInt::from_chunk(0xABCD, 0);
        assert_eq!(print(&a), "0x0000ABCD");
    }
}
