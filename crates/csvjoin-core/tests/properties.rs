//! Property tests for row accounting and decimal-comma rewriting.

use std::fs;

use csvjoin_core::{MergeOptions, merge_files, parses_as_float, to_comma_decimal};
use proptest::prelude::*;
use tempfile::TempDir;

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-z0-9]{1,5}", 1..4), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_row_count_drops_one_header_per_extra_file(
        files in prop::collection::vec(rows_strategy(), 1..5)
    ) {
        let dir = TempDir::new().unwrap();
        let mut inputs = Vec::new();
        for (idx, rows) in files.iter().enumerate() {
            let path = dir.path().join(format!("part_{idx}.csv"));
            let content: String = rows.iter().map(|row| format!("{}\n", row.join(","))).collect();
            fs::write(&path, content).unwrap();
            inputs.push(path);
        }
        let output = dir.path().join("out.csv");

        let report = merge_files(&inputs, &output, &MergeOptions::default()).unwrap();

        let expected = files[0].len() + files[1..].iter().map(|rows| rows.len() - 1).sum::<usize>();
        let written = fs::read_to_string(&output).unwrap();
        let first_line = written.lines().next().unwrap_or_default().to_string();
        prop_assert_eq!(report.rows_written, expected);
        prop_assert_eq!(written.lines().count(), expected);
        prop_assert_eq!(first_line, files[0][0].join(","));
    }

    #[test]
    fn decimal_literals_swap_only_the_separator(value in -1.0e9f64..1.0e9f64) {
        let literal = format!("{value:.3}");
        let rewritten = to_comma_decimal(&literal);
        let expected = literal.replace('.', ",");

        prop_assert_eq!(&*rewritten, expected.as_str());
        prop_assert!(!parses_as_float(&rewritten));
    }

    #[test]
    fn integers_are_untouched(value in any::<i64>()) {
        let literal = value.to_string();
        let rewritten = to_comma_decimal(&literal);
        prop_assert_eq!(&*rewritten, literal.as_str());
    }

    #[test]
    fn non_numeric_text_is_untouched(text in "[a-df-hj-mo-z .]{0,12}") {
        let rewritten = to_comma_decimal(&text);
        prop_assert_eq!(&*rewritten, text.as_str());
    }
}
