/// Switches controlling how strictly values and buffers are checked.
///
/// The defaults reject anything that would not survive a round trip exactly.
/// [`CodecOptions::lenient`] switches the checks off: oversized `int` values keep their low
/// 32 bits and text terminators are skipped without being compared.
///
/// # Examples
///
/// ```rust
/// use rowpack::CodecOptions;
///
/// let options = CodecOptions::lenient();
/// assert!(!options.check_int_range);
/// assert_eq!(CodecOptions::default(), CodecOptions::strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Reject `int` values outside the `i32` range instead of keeping their low 32 bits
    pub check_int_range: bool,

    /// Require the byte after each decoded text payload to be `0`
    pub verify_terminator: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            check_int_range: true,
            verify_terminator: true,
        }
    }
}

impl CodecOptions {
    /// Every check enabled. Same as [`CodecOptions::default`].
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Every check disabled: `int` values truncate silently and terminator bytes are
    /// consumed without being compared.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            check_int_range: false,
            verify_terminator: false,
        }
    }
}
