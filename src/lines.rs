//! Fixed line lists used by the report.

/// Lines charted individually, in the order their series are emitted.
/// The cross-line average is the mean of exactly these nine.
pub const TRACKED_LINES: [&str; 9] = [
    "Bergen County Line",
    "Gladstone Branch",
    "Main Line",
    "Montclair-Boonton Line",
    "Morristown Line",
    "North Jersey Coast Line",
    "Northeast Corridor Line",
    "Pascack Valley Line",
    "Raritan Valley Line",
];

/// Lines dropped from every monthly result, whatever the raw data holds.
pub const DENYLISTED_LINES: [&str; 2] = ["Atl. City Line", "Princeton Shuttle"];

/// Lines charted next to the average in the focused view.
pub const FOCUSED_LINES: [&str; 2] = ["North Jersey Coast Line", "Pascack Valley Line"];

pub fn is_denylisted(line: &str) -> bool {
    DENYLISTED_LINES.contains(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denylist_membership() {
        assert!(is_denylisted("Atl. City Line"));
        assert!(is_denylisted("Princeton Shuttle"));
        assert!(!is_denylisted("Main Line"));
    }

    #[test]
    fn test_tracked_and_denylisted_are_disjoint() {
        assert!(TRACKED_LINES.iter().all(|l| !is_denylisted(l)));
    }

    #[test]
    fn test_focused_lines_are_tracked() {
        assert!(FOCUSED_LINES.iter().all(|l| TRACKED_LINES.contains(l)));
    }
}
