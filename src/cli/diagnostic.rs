//! The one-line diagnostic printed on fatal failure.
//!
//! Layout is `<operation> : <description>`. Each field is truncated to
//! [`FIELD_CAP`] characters so a pathological message cannot flood stderr.

use std::io::{self, Write};

use crate::error::Error;

/// Maximum number of characters kept from each diagnostic field.
pub const FIELD_CAP: usize = 256;

/// Renders `<operation> : <description>` with both fields capped.
#[must_use]
pub fn format_diagnostic(operation: &str, description: &str) -> String {
    format!(
        "{:.cap$} : {:.cap$}",
        operation,
        description,
        cap = FIELD_CAP
    )
}

/// Writes the diagnostic for `err` as a single line.
pub fn write_diagnostic<W: Write>(mut out: W, err: &Error) -> io::Result<()> {
    writeln!(out, "{}", err.diagnostic())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn fields_are_joined_with_spaced_colon() {
        init_test("fields_are_joined_with_spaced_colon");
        let line = format_diagnostic("main", "semaphore closed");
        crate::assert_with_log!(
            line == "main : semaphore closed",
            "layout",
            "main : semaphore closed",
            line
        );
        crate::test_complete!("fields_are_joined_with_spaced_colon");
    }

    #[test]
    fn each_field_is_capped() {
        init_test("each_field_is_capped");
        let long_op = "o".repeat(FIELD_CAP + 40);
        let long_desc = "d".repeat(FIELD_CAP * 2);
        let line = format_diagnostic(&long_op, &long_desc);
        let (op, desc) = line.split_once(" : ").expect("separator");
        crate::assert_with_log!(op.len() == FIELD_CAP, "op capped", FIELD_CAP, op.len());
        crate::assert_with_log!(desc.len() == FIELD_CAP, "desc capped", FIELD_CAP, desc.len());
        crate::test_complete!("each_field_is_capped");
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        init_test("cap_counts_characters_not_bytes");
        let wide = "é".repeat(FIELD_CAP + 1);
        let line = format_diagnostic("main", &wide);
        let desc = line.split_once(" : ").expect("separator").1;
        let chars = desc.chars().count();
        crate::assert_with_log!(chars == FIELD_CAP, "char cap", FIELD_CAP, chars);
        crate::test_complete!("cap_counts_characters_not_bytes");
    }

    #[test]
    fn write_diagnostic_emits_one_line() {
        init_test("write_diagnostic_emits_one_line");
        let err = Error::new(ErrorKind::Resource, "main").with_message("thread join failed");
        let mut buf = Vec::new();
        write_diagnostic(&mut buf, &err).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        crate::assert_with_log!(
            text == "main : thread join failed\n",
            "single line",
            "main : thread join failed\n",
            text
        );
        crate::test_complete!("write_diagnostic_emits_one_line");
    }
}
