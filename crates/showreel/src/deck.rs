//! The slide registry.
//!
//! The deck is fixed at compile time. Navigation only moves an index into it;
//! the slides that embed a video are the ones the music steps aside for.

use crate::constants::media_url;
use crate::language::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSpec {
    pub file: &'static str,
    /// Level the video plays at when it has sound.
    pub volume: f32,
}

impl VideoSpec {
    pub fn url(&self) -> String {
        media_url(self.file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    Hero,
    Statement,
    Video,
    Columns,
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideSpec {
    pub key: &'static str,
    pub layout: SlideLayout,
    pub video: Option<VideoSpec>,
}

/// Localized text of a slide.
#[derive(Debug, Clone, Copy)]
pub struct SlideCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: &'static str,
}

const SLIDES: [SlideSpec; 9] = [
    SlideSpec {
        key: "intro",
        layout: SlideLayout::Hero,
        video: None,
    },
    SlideSpec {
        key: "statement",
        layout: SlideLayout::Statement,
        video: None,
    },
    SlideSpec {
        key: "live",
        layout: SlideLayout::Video,
        video: Some(VideoSpec {
            file: "Johnny%20GT%2001-2.mp4",
            volume: 0.4,
        }),
    },
    SlideSpec {
        key: "composer",
        layout: SlideLayout::Video,
        video: Some(VideoSpec {
            file: "Track%20Birthday%20Puxadinho%20Restorant%20(Arranjos%20originais%20de%20Johnny%20Rebou%C3%A7as.mp4",
            volume: 0.5,
        }),
    },
    SlideSpec {
        key: "guitar",
        layout: SlideLayout::Columns,
        video: None,
    },
    SlideSpec {
        key: "artist",
        layout: SlideLayout::Video,
        video: Some(VideoSpec {
            file: "VID_20251030_115234_050_1.mp4",
            volume: 0.45,
        }),
    },
    SlideSpec {
        key: "formats",
        layout: SlideLayout::Columns,
        video: None,
    },
    SlideSpec {
        key: "venues",
        layout: SlideLayout::Statement,
        video: None,
    },
    SlideSpec {
        key: "contact",
        layout: SlideLayout::Closing,
        video: None,
    },
];

#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<SlideSpec>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(SLIDES.to_vec())
    }
}

impl Deck {
    pub fn new(slides: Vec<SlideSpec>) -> Self {
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, index: usize) -> Option<&SlideSpec> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[SlideSpec] {
        &self.slides
    }

    pub fn has_video(&self, index: usize) -> bool {
        self.slide(index).is_some_and(|s| s.video.is_some())
    }

    /// Indices of the slides that embed a video.
    pub fn video_slides(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.video.is_some())
            .map(|(i, _)| i)
            .collect()
    }
}

impl SlideSpec {
    pub fn copy(&self, language: Language) -> SlideCopy {
        let (title, subtitle, body) = match (self.key, language) {
            ("intro", _) => (
                "Johnny Rebouças",
                "Brazilian Live Sessions",
                match language {
                    Language::EnUs => "Guitar, voice and loops from Brazil",
                    Language::Es => "Guitarra, voz y loops desde Brasil",
                    Language::PtBr => "Violão, voz e loops do Brasil",
                },
            ),
            ("statement", Language::EnUs) => (
                "Music that turns a room into an experience",
                "Live performance",
                "Bossa nova, MPB and contemporary grooves, arranged for every kind of event.",
            ),
            ("statement", Language::Es) => (
                "Música que convierte un espacio en una experiencia",
                "Presentación en vivo",
                "Bossa nova, MPB y ritmos contemporáneos, arreglados para cada tipo de evento.",
            ),
            ("statement", Language::PtBr) => (
                "Música que transforma um ambiente em experiência",
                "Apresentação ao vivo",
                "Bossa nova, MPB e grooves contemporâneos, arranjados para cada tipo de evento.",
            ),
            ("live", Language::EnUs) => ("Live Sessions", "On stage", "Recorded live, no overdubs."),
            ("live", Language::Es) => ("Live Sessions", "En el escenario", "Grabado en vivo, sin overdubs."),
            ("live", Language::PtBr) => ("Live Sessions", "No palco", "Gravado ao vivo, sem overdubs."),
            ("composer", Language::EnUs) => (
                "Composer & Producer",
                "Original arrangements",
                "Songs written and produced for artists, brands and celebrations.",
            ),
            ("composer", Language::Es) => (
                "Compositor y productor",
                "Arreglos originales",
                "Canciones escritas y producidas para artistas, marcas y celebraciones.",
            ),
            ("composer", Language::PtBr) => (
                "Compositor & Produtor",
                "Arranjos originais",
                "Canções escritas e produzidas para artistas, marcas e celebrações.",
            ),
            ("guitar", Language::EnUs) => (
                "The guitar",
                "Nylon strings, Brazilian soul",
                "Twenty years of samba, choro and jazz harmony.",
            ),
            ("guitar", Language::Es) => (
                "La guitarra",
                "Cuerdas de nylon, alma brasileña",
                "Veinte años de samba, choro y armonía de jazz.",
            ),
            ("guitar", Language::PtBr) => (
                "O violão",
                "Cordas de nylon, alma brasileira",
                "Vinte anos de samba, choro e harmonia jazzística.",
            ),
            ("artist", Language::EnUs) => ("The artist", "Behind the music", "From Salvador to the world."),
            ("artist", Language::Es) => ("El artista", "Detrás de la música", "De Salvador para el mundo."),
            ("artist", Language::PtBr) => ("O artista", "Por trás da música", "De Salvador para o mundo."),
            ("formats", Language::EnUs) => (
                "Formats",
                "Solo · Duo · Trio",
                "Acoustic sets, live looping and full band for weddings, corporate events and venues.",
            ),
            ("formats", Language::Es) => (
                "Formatos",
                "Solo · Dúo · Trío",
                "Sets acústicos, live looping y banda completa para bodas, eventos corporativos y locales.",
            ),
            ("formats", Language::PtBr) => (
                "Formatos",
                "Solo · Duo · Trio",
                "Sets acústicos, live looping e banda completa para casamentos, eventos corporativos e casas.",
            ),
            ("venues", Language::EnUs) => (
                "Where we have played",
                "Hotels, restaurants, festivals",
                "A repertoire that adapts to the audience, from dinner to dance floor.",
            ),
            ("venues", Language::Es) => (
                "Dónde hemos tocado",
                "Hoteles, restaurantes, festivales",
                "Un repertorio que se adapta al público, de la cena a la pista de baile.",
            ),
            ("venues", Language::PtBr) => (
                "Onde já tocamos",
                "Hotéis, restaurantes, festivais",
                "Um repertório que se adapta ao público, do jantar à pista de dança.",
            ),
            (_, Language::EnUs) => ("Let's talk", "Bookings", "booking@brazilianlivesessions.com"),
            (_, Language::Es) => ("Hablemos", "Contrataciones", "booking@brazilianlivesessions.com"),
            (_, Language::PtBr) => ("Vamos conversar", "Contratações", "booking@brazilianlivesessions.com"),
        };
        SlideCopy {
            title,
            subtitle,
            body,
        }
    }
}
