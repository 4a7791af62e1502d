use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Languages a transcript may be submitted in.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Serialize,
    DeriveActiveEnum,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "summary_language")]
pub enum Language {
    #[sea_orm(string_value = "en")]
    #[default]
    En,
    #[sea_orm(string_value = "es")]
    Es,
    #[sea_orm(string_value = "fr")]
    Fr,
    #[sea_orm(string_value = "de")]
    De,
    #[sea_orm(string_value = "pt")]
    Pt,
    #[sea_orm(string_value = "zh")]
    Zh,
}

impl Language {
    /// All supported language codes, in the order they are advertised to clients.
    pub const CODES: [&'static str; 6] = ["en", "es", "fr", "de", "pt", "zh"];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Pt => "pt",
            Language::Zh => "zh",
        }
    }

    /// English name of the language, used when instructing the model.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Pt => "Portuguese",
            Language::Zh => "Mandarin Chinese",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LanguageParseError;

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            "pt" => Ok(Language::Pt),
            "zh" => Ok(Language::Zh),
            _ => Err(LanguageParseError),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_advertised_code_parses_back_to_itself() {
        for code in Language::CODES {
            let language: Language = code.parse().unwrap();
            assert_eq!(language.code(), code);
        }
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!("EN".parse::<Language>(), Err(LanguageParseError));
        assert_eq!("english".parse::<Language>(), Err(LanguageParseError));
    }
}
