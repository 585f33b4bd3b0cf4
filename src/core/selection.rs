use std::collections::HashSet;

/// Words checked in the review table, across every page of the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    words: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, word: &str) {
        if !self.words.remove(word) {
            self.words.insert(word.to_string());
        }
    }

    /// Selects or deselects exactly the given words. Used for the
    /// "select all on this page" checkbox, so only rendered rows are touched.
    pub fn set_page_selected<'a, I>(&mut self, words_on_page: I, selected: bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for word in words_on_page {
            if selected {
                self.words.insert(word.to_string());
            } else {
                self.words.remove(word);
            }
        }
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Drops every selected word that is not in `still_valid`.
    /// Returns the number of words removed.
    pub fn prune(&mut self, still_valid: &HashSet<&str>) -> usize {
        let before = self.words.len();
        self.words.retain(|word| still_valid.contains(word.as_str()));
        before - self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// True when the iterator is non-empty and every word in it is selected.
    pub fn all_selected<'a, I>(&self, words: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for word in words {
            if !self.words.contains(word) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected words in a stable order, for request payloads.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        selection.toggle("猫");
        assert!(selection.contains("猫"));
        selection.toggle("猫");
        assert!(selection.is_empty());
    }

    #[test]
    fn page_bulk_actions_only_touch_given_words() {
        let mut selection = SelectionSet::new();
        selection.toggle("鳥");
        selection.set_page_selected(["猫", "犬"], true);
        assert_eq!(selection.to_sorted_vec(), vec!["犬", "猫", "鳥"]);

        selection.set_page_selected(["猫", "犬"], false);
        assert_eq!(selection.to_sorted_vec(), vec!["鳥"]);
    }

    #[test]
    fn all_selected_requires_non_empty_page() {
        let mut selection = SelectionSet::new();
        assert!(!selection.all_selected(std::iter::empty()));
        selection.set_page_selected(["猫", "犬"], true);
        assert!(selection.all_selected(["猫", "犬"]));
        assert!(!selection.all_selected(["猫", "馬"]));
    }

    #[test]
    fn prune_keeps_only_valid_words() {
        let mut selection = SelectionSet::new();
        selection.set_page_selected(["猫", "犬", "馬"], true);
        let valid: HashSet<&str> = ["犬", "鳥"].into_iter().collect();
        assert_eq!(selection.prune(&valid), 2);
        assert_eq!(selection.to_sorted_vec(), vec!["犬"]);
    }

    #[test]
    fn selection_stays_within_vocabulary_under_mixed_operations() {
        let mut vocabulary: Vec<&str> = vec!["一", "二", "三", "四", "五", "六"];
        let mut selection = SelectionSet::new();

        let steps: [(&str, usize); 8] = [
            ("toggle", 0),
            ("page", 2),
            ("shrink", 1),
            ("toggle", 3),
            ("page", 0),
            ("shrink", 0),
            ("toggle", 1),
            ("shrink", 2),
        ];

        for (op, arg) in steps {
            match op {
                "toggle" => {
                    if let Some(word) = vocabulary.get(arg) {
                        selection.toggle(word);
                    }
                }
                "page" => {
                    let page: Vec<&str> = vocabulary.iter().skip(arg).take(2).copied().collect();
                    selection.set_page_selected(page, true);
                }
                _ => {
                    if arg < vocabulary.len() {
                        vocabulary.remove(arg);
                    }
                    let valid: HashSet<&str> = vocabulary.iter().copied().collect();
                    selection.prune(&valid);
                }
            }
            assert!(selection.iter().all(|word| vocabulary.contains(&word)));
        }
    }
}
