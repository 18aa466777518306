/// General category values as they appear in the `gc` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    CasedLetter,
    ModifierLetter,
    OtherLetter,
    Letter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    Mark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    Number,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    Punctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    Symbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Separator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    Unassigned,
    Other,
}

use Category::*;

const TABLE: &[(&str, Category, &str)] = &[
    ("Lu", UppercaseLetter, "Uppercase Letter"),
    ("Ll", LowercaseLetter, "Lowercase Letter"),
    ("Lt", TitlecaseLetter, "Titlecase Letter"),
    ("LC", CasedLetter, "Cased Letter"),
    ("Lm", ModifierLetter, "Modifier Letter"),
    ("Lo", OtherLetter, "Other Letter"),
    ("L", Letter, "Letter"),
    ("Mn", NonspacingMark, "Nonspacing Mark"),
    ("Mc", SpacingMark, "Spacing Mark"),
    ("Me", EnclosingMark, "Enclosing Mark"),
    ("M", Mark, "Mark"),
    ("Nd", DecimalNumber, "Decimal Number"),
    ("Nl", LetterNumber, "Letter Number"),
    ("No", OtherNumber, "Other Number"),
    ("N", Number, "Number"),
    ("Pc", ConnectorPunctuation, "Connector Punctuation"),
    ("Pd", DashPunctuation, "Dash Punctuation"),
    ("Ps", OpenPunctuation, "Open Punctuation"),
    ("Pe", ClosePunctuation, "Close Punctuation"),
    ("Pi", InitialPunctuation, "Initial Punctuation"),
    ("Pf", FinalPunctuation, "Final Punctuation"),
    ("Po", OtherPunctuation, "Other Punctuation"),
    ("P", Punctuation, "Punctuation"),
    ("Sm", MathSymbol, "Math Symbol"),
    ("Sc", CurrencySymbol, "Currency Symbol"),
    ("Sk", ModifierSymbol, "Modifier Symbol"),
    ("So", OtherSymbol, "Other Symbol"),
    ("S", Symbol, "Symbol"),
    ("Zs", SpaceSeparator, "Space Separator"),
    ("Zl", LineSeparator, "Line Separator"),
    ("Zp", ParagraphSeparator, "Paragraph Separator"),
    ("Z", Separator, "Separator"),
    ("Cc", Control, "Control"),
    ("Cf", Format, "Format"),
    ("Cs", Surrogate, "Surrogate"),
    ("Co", PrivateUse, "Private Use"),
    ("Cn", Unassigned, "Unassigned"),
    ("C", Other, "Other"),
];

impl Category {
    pub fn from_code(code: &str) -> Option<Category> {
        TABLE.iter().find(|(c, _, _)| *c == code).map(|(_, cat, _)| *cat)
    }

    pub fn label(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, cat, _)| *cat == self)
            .map(|(_, _, label)| *label)
            .unwrap_or("Other")
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(Category::from_code("Lu").map(Category::label), Some("Uppercase Letter"));
        assert_eq!(Category::from_code("Nd").map(Category::label), Some("Decimal Number"));
        assert_eq!(Category::from_code("Zs").map(Category::label), Some("Space Separator"));
        assert_eq!(Category::from_code("C").map(Category::label), Some("Other"));
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!(Category::from_code("lu").is_none());
        assert!(Category::from_code("Xx").is_none());
        assert!(Category::from_code("").is_none());
    }

    #[test]
    fn every_code_resolves_to_its_own_row() {
        for (code, cat, label) in TABLE {
            assert_eq!(Category::from_code(code), Some(*cat));
            assert_eq!(cat.label(), *label);
        }
        assert_eq!(TABLE.len(), 38);
    }
}
