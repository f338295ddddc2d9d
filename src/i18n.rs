use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Br,
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Br, Language::En, Language::Es];

    pub fn code(self) -> &'static str {
        match self {
            Language::Br => "br",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "br" | "pt" | "pt-br" => Some(Language::Br),
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::Br => Language::En,
            Language::En => Language::Es,
            Language::Es => Language::Br,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Welcome,
    AttemptsUsed,
    AttemptsRemaining,
    Hits,
    Nationality,
    Team,
    Year,
    Competition,
    Number,
    DominantFoot,
    PlayerPlaceholder,
    Guess,
    DailyChallenge,
    FreePlay,
    Congratulations,
    TooBad,
    VictoryDistribution,
    Share,
    NewGame,
    NextChallenge,
    WinMessage,
    LoseMessage,
    Played,
    WinRate,
    NoClip,
    OpenClip,
    Copied,
    SavedForCopy,
    ShareFailed,
}

/// Translation lookup with `{placeholder}` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn text(&self, key: Key) -> &'static str {
        translation(self.language, key)
    }

    pub fn t(&self, key: Key, replacements: &[(&str, String)]) -> String {
        let mut out = self.text(key).to_string();
        for (name, value) in replacements {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }

    /// Dominant foot values are stored in Portuguese (`Direito`, `Esquerdo`, `Ambidestro`).
    pub fn foot(&self, raw: &str) -> String {
        let idx = match raw.trim().to_lowercase().as_str() {
            "direito" => 0,
            "esquerdo" => 1,
            "ambidestro" => 2,
            _ => return raw.to_string(),
        };
        let table: [&str; 3] = match self.language {
            Language::Br => ["Direito", "Esquerdo", "Ambidestro"],
            Language::En => ["Right", "Left", "Ambidextrous"],
            Language::Es => ["Derecho", "Izquierdo", "Ambidiestro"],
        };
        table[idx].to_string()
    }
}

fn translation(lang: Language, key: Key) -> &'static str {
    match lang {
        Language::Br => br(key),
        Language::En => en(key),
        Language::Es => es(key),
    }
}

fn br(key: Key) -> &'static str {
    match key {
        Key::Welcome => "Bem vindo, Jogador",
        Key::AttemptsUsed => "Tentativas Usadas",
        Key::AttemptsRemaining => "Tentativas Restantes",
        Key::Hits => "Acertos",
        Key::Nationality => "Nacionalidade",
        Key::Team => "Equipe",
        Key::Year => "Ano",
        Key::Competition => "Competição",
        Key::Number => "Número",
        Key::DominantFoot => "Pé Dominante",
        Key::PlayerPlaceholder => "Digite o nome do jogador...",
        Key::Guess => "Adivinhar",
        Key::DailyChallenge => "📅 Desafio Diário",
        Key::FreePlay => "🎮 Jogar à Vontade",
        Key::Congratulations => "Parabéns!",
        Key::TooBad => "Que pena!",
        Key::VictoryDistribution => "Distribuição de Vitórias",
        Key::Share => "📱 Partilhar",
        Key::NewGame => "🎯 Novo Jogo",
        Key::NextChallenge => "Próximo desafio em:",
        Key::WinMessage => "Você acertou em {attempts}/{maxAttempts} tentativas!",
        Key::LoseMessage => "Você esgotou as {maxAttempts} tentativas.",
        Key::Played => "Jogos",
        Key::WinRate => "% Vitórias",
        Key::NoClip => "Vídeo indisponível",
        Key::OpenClip => "Abrir vídeo",
        Key::Copied => "Copiado para a área de transferência!",
        Key::SavedForCopy => "Texto salvo em {path}",
        Key::ShareFailed => "Erro ao partilhar. Tente novamente.",
    }
}

fn en(key: Key) -> &'static str {
    match key {
        Key::Welcome => "Welcome, Player",
        Key::AttemptsUsed => "Attempts Used",
        Key::AttemptsRemaining => "Attempts Remaining",
        Key::Hits => "Hits",
        Key::Nationality => "Nationality",
        Key::Team => "Team",
        Key::Year => "Year",
        Key::Competition => "Competition",
        Key::Number => "Number",
        Key::DominantFoot => "Dominant Foot",
        Key::PlayerPlaceholder => "Enter player name...",
        Key::Guess => "Guess",
        Key::DailyChallenge => "📅 Daily Challenge",
        Key::FreePlay => "🎮 Free Play",
        Key::Congratulations => "Congratulations!",
        Key::TooBad => "Too bad!",
        Key::VictoryDistribution => "Victory Distribution",
        Key::Share => "📱 Share",
        Key::NewGame => "🎯 New Game",
        Key::NextChallenge => "Next challenge in:",
        Key::WinMessage => "You got it right in {attempts}/{maxAttempts} attempts!",
        Key::LoseMessage => "You used all {maxAttempts} attempts.",
        Key::Played => "Played",
        Key::WinRate => "Win %",
        Key::NoClip => "Clip unavailable",
        Key::OpenClip => "Open clip",
        Key::Copied => "Copied to clipboard!",
        Key::SavedForCopy => "Text saved to {path}",
        Key::ShareFailed => "Sharing failed. Please try again.",
    }
}

fn es(key: Key) -> &'static str {
    match key {
        Key::Welcome => "Bienvenido, Jugador",
        Key::AttemptsUsed => "Intentos Usados",
        Key::AttemptsRemaining => "Intentos Restantes",
        Key::Hits => "Aciertos",
        Key::Nationality => "Nacionalidad",
        Key::Team => "Equipo",
        Key::Year => "Año",
        Key::Competition => "Competición",
        Key::Number => "Número",
        Key::DominantFoot => "Pie Dominante",
        Key::PlayerPlaceholder => "Introduce el nombre del jugador...",
        Key::Guess => "Adivinar",
        Key::DailyChallenge => "📅 Reto Diario",
        Key::FreePlay => "🎮 Juego Libre",
        Key::Congratulations => "¡Felicidades!",
        Key::TooBad => "¡Qué pena!",
        Key::VictoryDistribution => "Distribución de Victorias",
        Key::Share => "📱 Compartir",
        Key::NewGame => "🎯 Nuevo Juego",
        Key::NextChallenge => "Próximo desafío en:",
        Key::WinMessage => "¡Acertaste en {attempts}/{maxAttempts} intentos!",
        Key::LoseMessage => "Agotaste los {maxAttempts} intentos.",
        Key::Played => "Jugados",
        Key::WinRate => "% Victorias",
        Key::NoClip => "Video no disponible",
        Key::OpenClip => "Abrir video",
        Key::Copied => "¡Copiado al portapapeles!",
        Key::SavedForCopy => "Texto guardado en {path}",
        Key::ShareFailed => "Error al compartir. Inténtalo de nuevo.",
    }
}
