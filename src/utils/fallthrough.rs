//! Marker for arms that intentionally continue into shared handling.
//!
//! `match` arms never fall through, so ported multi-way branches usually
//! become an arm that does its own work and then lets control reach code
//! after the `match`. `fallthrough!()` marks those arms for readers and
//! compiles to `()`.

/// Annotates an intentional fall-through. Expands to `()`.
///
/// ```
/// use platform_shim::fallthrough;
///
/// fn bonus(level: u8) -> u32 {
///     let mut total = 0;
///     match level {
///         3 => {
///             total += 100;
///             fallthrough!()
///         }
///         _ => {}
///     }
///     total + 10
/// }
///
/// assert_eq!(bonus(3), 110);
/// assert_eq!(bonus(1), 10);
/// ```
#[macro_export]
macro_rules! fallthrough {
    () => {
        ()
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_fallthrough_is_unit() {
        let marker: () = fallthrough!();
        assert_eq!(marker, ());
    }

    #[test]
    fn test_fallthrough_in_match_arm() {
        let mut seen = Vec::new();
        for key in [b'y', b'n', b'q'] {
            match key {
                b'y' => {
                    seen.push("yes");
                    fallthrough!()
                }
                b'n' => seen.push("no"),
                _ => {}
            }
        }
        assert_eq!(seen, vec!["yes", "no"]);
    }
}
