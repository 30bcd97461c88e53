use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    EnUs,
    Es,
    PtBr,
}

/// Interface copy that is not tied to a slide.
pub struct UiStrings {
    pub selector_title: &'static str,
    pub instruction_arrows: &'static str,
    pub instruction_swipe: &'static str,
    pub enable_audio: &'static str,
    pub muted: &'static str,
    pub unmuted: &'static str,
    pub loading: &'static str,
}

const EN_US: UiStrings = UiStrings {
    selector_title: "Brazilian Live Sessions",
    instruction_arrows: "Use the arrow keys to navigate",
    instruction_swipe: "Swipe to navigate",
    enable_audio: "Click to activate audio",
    muted: "Music off",
    unmuted: "Music on",
    loading: "Loading",
};

const ES: UiStrings = UiStrings {
    selector_title: "Brazilian Live Sessions",
    instruction_arrows: "Usa las flechas para navegar",
    instruction_swipe: "Desliza para navegar",
    enable_audio: "Haz clic para activar el audio",
    muted: "Música apagada",
    unmuted: "Música encendida",
    loading: "Cargando",
};

const PT_BR: UiStrings = UiStrings {
    selector_title: "Brazilian Live Sessions",
    instruction_arrows: "Use as setas para navegar",
    instruction_swipe: "Deslize para navegar",
    enable_audio: "Clique para ativar o áudio",
    muted: "Música desligada",
    unmuted: "Música ligada",
    loading: "Carregando",
};

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::EnUs, Language::Es, Language::PtBr]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-us",
            Self::Es => "es",
            Self::PtBr => "pt-br",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EnUs => "EN/US",
            Self::Es => "ES",
            Self::PtBr => "PT/BR",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::EnUs => "\u{1F1FA}\u{1F1F8}",
            Self::Es => "\u{1F1EA}\u{1F1F8}",
            Self::PtBr => "\u{1F1E7}\u{1F1F7}",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en-us" | "en" => Some(Self::EnUs),
            "es" => Some(Self::Es),
            "pt-br" | "pt" => Some(Self::PtBr),
            _ => None,
        }
    }

    /// The language after this one in the switcher.
    pub fn next(self) -> Self {
        match self {
            Self::EnUs => Self::Es,
            Self::Es => Self::PtBr,
            Self::PtBr => Self::EnUs,
        }
    }

    pub fn ui(self) -> &'static UiStrings {
        match self {
            Self::EnUs => &EN_US,
            Self::Es => &ES,
            Self::PtBr => &PT_BR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(*lang));
        }
        assert_eq!(Language::from_code("PT"), Some(Language::PtBr));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn switcher_cycles_through_every_language() {
        let mut lang = Language::EnUs;
        for _ in 0..Language::all().len() {
            lang = lang.next();
        }
        assert_eq!(lang, Language::EnUs);
    }
}
