use crate::Label;

/// Generates labels for new ordinary nodes: `a`, `b`, ..., `z`, `aa`, `ab`, ...
#[derive(Debug, Clone, Default)]
pub struct LabelGenerator {
    next: u32,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next label for which `in_use` returns `false`.
    pub fn next_unused(&mut self, mut in_use: impl FnMut(&Label) -> bool) -> Label {
        loop {
            let label = nth_label(self.next);
            self.next += 1;
            if !in_use(&label) {
                return label;
            }
        }
    }
}

/// Bijective base-26 numbering with the digits `a` to `z`.
fn nth_label(mut n: u32) -> Label {
    let mut chars = Vec::new();
    loop {
        chars.push(char::from(b'a' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    chars.into_iter().rev().collect::<String>().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_labels_like_spreadsheet_columns() {
        assert_eq!(nth_label(0).as_str(), "a");
        assert_eq!(nth_label(25).as_str(), "z");
        assert_eq!(nth_label(26).as_str(), "aa");
        assert_eq!(nth_label(27).as_str(), "ab");
        assert_eq!(nth_label(51).as_str(), "az");
        assert_eq!(nth_label(52).as_str(), "ba");
        assert_eq!(nth_label(701).as_str(), "zz");
        assert_eq!(nth_label(702).as_str(), "aaa");
    }

    #[test]
    fn skips_labels_in_use() {
        let mut generator = LabelGenerator::new();
        let taken = [Label::new("b"), Label::new("c")];
        assert_eq!(generator.next_unused(|l| taken.contains(l)).as_str(), "a");
        assert_eq!(generator.next_unused(|l| taken.contains(l)).as_str(), "d");
        assert_eq!(generator.next_unused(|_| false).as_str(), "e");
    }
}
