//! Plain-text problem format.
//!
//! ```text
//! 3            // number of bags
//! 10           // capacity of every bag
//! bread 3 + butter jam
//! bleach 4 - bread butter
//! butter 2
//! jam 1
//! ```
//!
//! Line 1 is the bag count, line 2 the capacity, and every further line
//! an item: `<name> <size> [<+|-> <companion>...]`. `+` lists the only
//! items it may share a bag with, `-` the items it must not share one
//! with, and no symbol means it is compatible with everything. Text after
//! `//` is ignored and lines left blank are skipped.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::problem::{CompatibilityRule, ItemSpec, Problem};

/// Parses problem text.
///
/// # Examples
///
/// ```
/// use u_bagging::parse::parse_problem;
///
/// let problem = parse_problem("2\n10\neggs 3 - bricks\nbricks 7\n").unwrap();
/// assert_eq!(problem.bag_count(), 2);
/// assert_eq!(problem.item_count(), 2);
/// ```
pub fn parse_problem(text: &str) -> Result<Problem> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line)))
        .filter(|(_, line)| !line.is_empty());

    let bag_count = next_number::<usize>(&mut lines, "bag count")?;
    let capacity = next_number::<i64>(&mut lines, "bag capacity")?;

    let specs = lines
        .map(|(line_no, line)| parse_item(line_no, line))
        .collect::<Result<Vec<_>>>()?;

    Problem::new(bag_count, capacity, specs)
}

/// Reads and parses a problem file.
pub fn read_problem(path: impl AsRef<Path>) -> Result<Problem> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    parse_problem(&text)
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(at) => line[..at].trim(),
        None => line.trim(),
    }
}

fn next_number<'a, T: std::str::FromStr>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> Result<T> {
    let (line_no, line) = lines.next().ok_or_else(|| Error::Parse {
        line: 0,
        message: format!("missing {what}"),
    })?;
    line.parse().map_err(|_| Error::Parse {
        line: line_no,
        message: format!("invalid {what}: {line}"),
    })
}

fn parse_item(line_no: usize, line: &str) -> Result<ItemSpec> {
    let mut fields = line.split_whitespace();
    let parse_err = |message: String| Error::Parse {
        line: line_no,
        message,
    };

    let name = fields
        .next()
        .ok_or_else(|| parse_err("missing item name".into()))?;
    let size = fields
        .next()
        .ok_or_else(|| parse_err(format!("missing size for item {name}")))?;
    let size: i64 = size
        .parse()
        .map_err(|_| parse_err(format!("invalid size for item {name}: {size}")))?;

    let rule = match fields.next() {
        None => CompatibilityRule::Universal,
        Some("+") => CompatibilityRule::Inclusive(fields.map(String::from).collect()),
        Some("-") => CompatibilityRule::Exclusive(fields.map(String::from).collect()),
        Some(symbol) => {
            return Err(parse_err(format!(
                "invalid compatibility symbol (use '+' or '-'): {symbol}"
            )))
        }
    };

    Ok(ItemSpec {
        name: name.to_string(),
        size,
        rule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
3 // bags
10
// groceries below

bread 3 + butter jam
bleach 4 - bread butter   // keep away from food
butter 2
jam 1 +
";

    #[test]
    fn test_parse_sample() {
        let problem = parse_problem(SAMPLE).unwrap();
        assert_eq!(problem.bag_count(), 3);
        assert_eq!(problem.capacity(), 10);
        assert_eq!(problem.item_count(), 4);

        let bread = problem.id_of("bread").unwrap();
        let bleach = problem.id_of("bleach").unwrap();
        let butter = problem.id_of("butter").unwrap();
        let jam = problem.id_of("jam").unwrap();

        assert_eq!(problem.size(bleach), 4);
        assert!(problem.compatibility(bread).contains(jam));
        assert!(!problem.compatibility(bread).contains(bleach));
        assert!(!problem.compatibility(bleach).contains(butter));
        assert!(problem.compatibility(bleach).contains(jam));
        assert_eq!(problem.compatibility(butter).len(), 4);
        // '+' with no names: only itself
        assert_eq!(problem.compatibility(jam).iter().collect::<Vec<_>>(), vec![jam]);
    }

    #[test]
    fn test_comment_stripping() {
        assert_eq!(strip_comment("  milk 2 // fresh  "), "milk 2");
        assert_eq!(strip_comment("// whole line"), "");
        assert_eq!(strip_comment("eggs 1"), "eggs 1");
    }

    #[test]
    fn test_invalid_symbol() {
        let err = parse_problem("1\n5\nmilk 2 * eggs\neggs 1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
        assert!(err.to_string().contains('*'));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            parse_problem("two\n5\n"),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_problem("2\n\n\nbig\n"),
            Err(Error::Parse { line: 4, .. })
        ));
        assert!(matches!(
            parse_problem("2\n5\nmilk lots\n"),
            Err(Error::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_problem("2\n5\nmilk\n"),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse_problem("// nothing here\n"),
            Err(Error::Parse { line: 0, .. })
        ));
        assert!(matches!(parse_problem("4\n"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_unknown_companion_surfaces() {
        let err = parse_problem("1\n5\nmilk 2 + cookies\n").unwrap_err();
        assert!(matches!(err, Error::UnknownCompanion { .. }));
    }

    #[test]
    fn test_sizes_summing_past_i64_rejected() {
        let text = "2\n9223372036854775807\na 9223372036854775807\nb 9223372036854775807\n";
        let err = parse_problem(text).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_problem("/definitely/not/here.txt").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join(format!("u-bagging-parse-{}.txt", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();
        let problem = read_problem(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(problem.item_count(), 4);
    }
}
