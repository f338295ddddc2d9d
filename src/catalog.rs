use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: u32,
    pub player: String,
    pub team: String,
    pub year: Option<u16>,
    pub competition: Option<String>,
    pub jersey_number: u8,
    pub dominant_foot: String,
    pub nationality: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

/// Fixed list of goals the quiz draws from. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    goals: Vec<GoalRecord>,
}

impl Catalog {
    pub fn new(goals: Vec<GoalRecord>) -> Self {
        Self { goals }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(SeedGoal::to_record).collect())
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    pub fn get(&self, id: u32) -> Option<&GoalRecord> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Goal for a calendar date: day-of-year (1 for January 1st) modulo catalog size.
    pub fn goal_of_day(&self, date: NaiveDate) -> Option<&GoalRecord> {
        if self.goals.is_empty() {
            return None;
        }
        let idx = date.ordinal() as usize % self.goals.len();
        self.goals.get(idx)
    }

    pub fn random_goal<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&GoalRecord> {
        if self.goals.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.goals.len());
        self.goals.get(idx)
    }

    /// Unique player names, sorted, for the autocomplete list.
    pub fn player_names(&self) -> Vec<String> {
        let mut names = self
            .goals
            .iter()
            .map(|g| g.player.clone())
            .collect::<Vec<_>>();
        names.sort();
        names.dedup();
        names
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct SeedGoal {
    id: u32,
    video: Option<&'static str>,
    player: &'static str,
    team: &'static str,
    year: Option<u16>,
    competition: Option<&'static str>,
    jersey: u8,
    foot: &'static str,
    nationality: &'static str,
    description: Option<&'static str>,
}

impl SeedGoal {
    fn to_record(&self) -> GoalRecord {
        GoalRecord {
            id: self.id,
            player: self.player.to_string(),
            team: self.team.to_string(),
            year: self.year,
            competition: self.competition.map(str::to_string),
            jersey_number: self.jersey,
            dominant_foot: self.foot.to_string(),
            nationality: self.nationality.to_string(),
            description: self.description.map(str::to_string),
            video_url: self.video.map(|file| format!("{CLIP_BASE_URL}/{file}")),
        }
    }
}

const CLIP_BASE_URL: &str = "https://pub-61992242d95c4c08a5588448f8a876fc.r2.dev";

const BUILTIN: &[SeedGoal] = &[
    SeedGoal {
        id: 1,
        video: Some("videoronaldo.mp4"),
        player: "Ronaldo",
        team: "Corinthians",
        year: Some(2009),
        competition: Some("Campeonato Paulista"),
        jersey: 9,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Um gol icónico de cobertura contra o Santos na final do Paulistão, demonstrando a classe e experiência do fenómeno brasileiro.",
        ),
    },
    SeedGoal {
        id: 2,
        video: Some("videoronaldin.mp4"),
        player: "Ronaldinho Gaúcho",
        team: "Atlético Mineiro",
        year: Some(2013),
        competition: Some("Copa Libertadores"),
        jersey: 10,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Um gol de livre magistral que ajudou o Atlético a conquistar a Libertadores, mostrando toda a magia do craque gaúcho.",
        ),
    },
    SeedGoal {
        id: 3,
        video: Some("videolance12.mp4"),
        player: "Cristiano Ronaldo",
        team: "Real Madrid",
        year: Some(2018),
        competition: Some("Champions League"),
        jersey: 7,
        foot: "Direito",
        nationality: "Português",
        description: Some(
            "Gol de bicicleta antológico na Champions League, demonstrando a técnica e atleticismo do craque português.",
        ),
    },
    SeedGoal {
        id: 4,
        video: Some("lanceromario.mp4"),
        player: "Romário",
        team: "Barcelona",
        year: Some(1994),
        competition: Some("La Liga"),
        jersey: 11,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Um gol de oportunismo puro do baixinho, demonstrando sua capacidade de finalização dentro da área.",
        ),
    },
    SeedGoal {
        id: 5,
        video: Some("videolance2.mp4"),
        player: "Zico",
        team: "Flamengo",
        year: Some(1981),
        competition: Some("Copa Libertadores"),
        jersey: 10,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Livre direto perfeito do Galinho de Quintino, um dos seus muitos golazos pelo Mengão na conquista da Libertadores.",
        ),
    },
    SeedGoal {
        id: 6,
        video: Some("videolance3.mp4"),
        player: "Kaká",
        team: "Milan",
        year: Some(2007),
        competition: Some("Champions League"),
        jersey: 22,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Gol espetacular do craque brasileiro na semifinal da Champions, mostrando velocidade e precisão na finalização.",
        ),
    },
    SeedGoal {
        id: 7,
        video: Some("videolance10.mp4"),
        player: "Rivaldo",
        team: "Barcelona",
        year: Some(2001),
        competition: Some("La Liga"),
        jersey: 10,
        foot: "Esquerdo",
        nationality: "Brasileiro",
        description: Some(
            "Hat-trick histórico contra o Valencia, com o último gol sendo uma bicicleta antológica que garantiu a vaga na Champions.",
        ),
    },
    SeedGoal {
        id: 8,
        video: Some("videolance6.mp4"),
        player: "Messi",
        team: "Barcelona",
        year: Some(2012),
        competition: Some("Supercopa da Espanha"),
        jersey: 10,
        foot: "Esquerdo",
        nationality: "Argentino",
        description: Some(
            "Gol da pulga de falta absurdo contra o Real Madrid no El Classico na final da Supercopa da Espanha",
        ),
    },
    SeedGoal {
        id: 9,
        video: Some("videolance1.mp4"),
        player: "Garrincha",
        team: "Brasil",
        year: Some(1962),
        competition: Some("Copa do Mundo"),
        jersey: 7,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Gol mágico do Anjo das Pernas Tortas na Copa do Mundo do Chile, driblando meio time adversário antes de finalizar.",
        ),
    },
    SeedGoal {
        id: 10,
        video: Some("videolance5.mp4"),
        player: "Neymar",
        team: "Santos",
        year: Some(2011),
        competition: Some("Copa Libertadores"),
        jersey: 11,
        foot: "Direito",
        nationality: "Brasileiro",
        description: Some(
            "Gol antológico do jovem craque santista, mostrando dribles desconcertantes e finalização perfeita na conquista da Libertadores.",
        ),
    },
    SeedGoal {
        id: 11,
        video: Some("videolance8.mp4"),
        player: "Rivaldo",
        team: "Barcelona",
        year: Some(2001),
        competition: Some("La Liga"),
        jersey: 10,
        foot: "Esquerdo",
        nationality: "Brasileiro",
        description: Some(
            "Mais uma obra de arte de Rivaldo, com um chutaço de fora da área característico de sua genialidade.",
        ),
    },
    SeedGoal {
        id: 12,
        video: Some("videolance9.mp4"),
        player: "Rivaldo",
        team: "Barcelona",
        year: Some(2001),
        competition: Some("La Liga"),
        jersey: 10,
        foot: "Esquerdo",
        nationality: "Brasileiro",
        description: Some(
            "Gol de pura técnica e precisão do craque brasileiro em noite de La Liga, deixando o marcador para trás e finalizando com categoria.",
        ),
    },
    SeedGoal {
        id: 13,
        video: Some("videolance13.mp4"),
        player: "Raphinha",
        team: "Leeds",
        year: Some(2020),
        competition: Some("Premier League"),
        jersey: 18,
        foot: "Esquerdo",
        nationality: "Brasileiro",
        description: Some(
            "Gol de placa do craque brasileiro Raphinha mandando a bola na gaveta na goleada de 5 a 0 para cima do West Bromwich",
        ),
    },
    SeedGoal {
        id: 14,
        video: Some("videolance14.mp4"),
        player: "Noni Madueke",
        team: "Chelsea",
        year: Some(2024),
        competition: Some("Premier League"),
        jersey: 11,
        foot: "Direito",
        nationality: "Inglês",
        description: Some(
            "Gol de oportunista para diminuir o placar contra o Aston Villa em um grande jogo na Premier League",
        ),
    },
    SeedGoal {
        id: 15,
        video: Some("videolance15.mp4"),
        player: "Kingsley Coman",
        team: "Bayern Munich",
        year: Some(2020),
        competition: Some("Bundesliga"),
        jersey: 29,
        foot: "Direito",
        nationality: "Francês",
        description: Some("Gol de atacante nato do Coman defendendo a camisa do Bayern de Munique"),
    },
    SeedGoal {
        id: 16,
        video: None,
        player: "Callum Hudson-Odoi",
        team: "Nottingham Forest",
        year: None,
        competition: None,
        jersey: 7,
        foot: "Direito",
        nationality: "Inglês",
        description: None,
    },
    SeedGoal {
        id: 17,
        video: None,
        player: "Nathan Tella",
        team: "Bayer Leverkusen",
        year: None,
        competition: None,
        jersey: 23,
        foot: "Direito",
        nationality: "Nigeriano",
        description: None,
    },
    SeedGoal {
        id: 18,
        video: None,
        player: "Alphonso Davies",
        team: "Bayern Munich",
        year: None,
        competition: None,
        jersey: 19,
        foot: "Direito",
        nationality: "Canadense",
        description: None,
    },
    SeedGoal {
        id: 19,
        video: None,
        player: "Jamal Musiala",
        team: "Bayern Munich",
        year: None,
        competition: None,
        jersey: 42,
        foot: "Direito",
        nationality: "Alemão",
        description: None,
    },
    SeedGoal {
        id: 20,
        video: None,
        player: "Domenico Berardi",
        team: "Sassuolo",
        year: None,
        competition: None,
        jersey: 25,
        foot: "Direito",
        nationality: "Italiano",
        description: None,
    },
    SeedGoal {
        id: 21,
        video: None,
        player: "Edin Višća",
        team: "Galatasaray",
        year: None,
        competition: None,
        jersey: 7,
        foot: "Direito",
        nationality: "Bósnio",
        description: None,
    },
    SeedGoal {
        id: 22,
        video: None,
        player: "Jarrod Bowen",
        team: "West Ham United",
        year: None,
        competition: None,
        jersey: 20,
        foot: "Direito",
        nationality: "Inglês",
        description: None,
    },
];
