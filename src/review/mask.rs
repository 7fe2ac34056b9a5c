/// Placeholder shown instead of the answer word.
pub const MASK: &str = "********";

const SECTION_BREAK: &str = "\n\n";

/// Prepares a definition for self-testing: drops the first section (the
/// heading naming the word) and hides every occurrence of `word`.
pub fn masked_prompt(definition: &str, word: &str) -> String {
    let sections: Vec<&str> = definition.split(SECTION_BREAK).collect();
    let body = if sections.len() > 1 {
        sections[1..].join(SECTION_BREAK)
    } else {
        definition.to_string()
    };
    if word.is_empty() {
        return body;
    }
    body.replace(word, MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_section_is_kept() {
        assert_eq!(masked_prompt("foo is bar", "foo"), "******** is bar");
    }

    #[test]
    fn test_first_section_is_dropped() {
        let definition = "ház\n\nhouse, home\n\nA ház nagy.\nMy ház is big.";
        assert_eq!(
            masked_prompt(definition, "ház"),
            "house, home\n\nA ******** nagy.\nMy ******** is big."
        );
    }

    #[test]
    fn test_every_occurrence_is_hidden() {
        assert_eq!(masked_prompt("x\n\nfoofoo foo", "foo"), "**************** ********");
    }

    #[test]
    fn test_empty_word_leaves_text() {
        assert_eq!(masked_prompt("a\n\nb", ""), "b");
    }
}
