//! Scene flow: start screen, game, game-over screen
//!
//! Releasing the pointer on the start or game-over screen builds a fresh game.
//! The game hands over to the game-over screen once it reports
//! [`GameEvent::PresentGameOver`].

use crate::layout::{SceneError, SceneLayout};
use crate::sim::{GameEvent, GameState};

/// Release codenames, picked by `score % CODENAMES.len()`
pub const CODENAMES: [&str; 19] = [
    "Joshua Tree",
    "Redwood",
    "Alcatraz",
    "Golden Gate",
    "Sturtevant",
    "Tahoe",
    "Sequoia",
    "Death Valley",
    "Balboa",
    "Oxnard",
    "Rancho Cucamonga",
    "Hollywood",
    "Weed",
    "Monterey",
    "Santa Cruz",
    "Julian",
    "Napa",
    "Pfeiffer",
    "McWay",
];

/// Codenames with their own voice line after the announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodenameCue {
    Oxnard,
    RanchoCucamonga,
    Weed,
}

impl CodenameCue {
    fn for_codename(codename: &str) -> Option<Self> {
        match codename {
            "Oxnard" => Some(CodenameCue::Oxnard),
            "Rancho Cucamonga" => Some(CodenameCue::RanchoCucamonga),
            "Weed" => Some(CodenameCue::Weed),
            _ => None,
        }
    }
}

/// Final score and the release it earned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverScreen {
    pub score: u64,
    pub codename: &'static str,
    pub cue: Option<CodenameCue>,
}

impl GameOverScreen {
    pub fn new(score: u64) -> Self {
        let codename = CODENAMES[(score % CODENAMES.len() as u64) as usize];
        Self {
            score,
            codename,
            cue: CodenameCue::for_codename(codename),
        }
    }

    /// Name label text
    pub fn title(&self) -> String {
        format!("macOS {}", self.codename)
    }
}

/// The scene currently presented
#[derive(Debug)]
pub enum Scene {
    Start,
    Game(Box<GameState>),
    GameOver(GameOverScreen),
}

impl Scene {
    /// Build a new game scene
    pub fn new_game(layout: &SceneLayout, seed: u64) -> Result<Self, SceneError> {
        let state = GameState::new(layout, seed)?;
        log::info!("New game (seed {})", seed);
        Ok(Scene::Game(Box::new(state)))
    }

    /// Pointer released: start or restart from the menu screens
    ///
    /// Returns true when a new game began.
    pub fn pointer_up(&mut self, layout: &SceneLayout, seed: u64) -> Result<bool, SceneError> {
        match self {
            Scene::Start | Scene::GameOver(_) => {
                *self = Scene::new_game(layout, seed)?;
                Ok(true)
            }
            Scene::Game(_) => Ok(false),
        }
    }

    /// Follow scene requests in a drained batch of game events
    ///
    /// Returns the game-over screen when the transition happened.
    pub fn handle_events(&mut self, events: &[GameEvent]) -> Option<&GameOverScreen> {
        if !matches!(self, Scene::Game(_)) {
            return None;
        }
        let score = events.iter().find_map(|e| match e {
            GameEvent::PresentGameOver { score } => Some(*score),
            _ => None,
        })?;
        let screen = GameOverScreen::new(score);
        log::info!("Game over screen: {} ({})", score, screen.title());
        *self = Scene::GameOver(screen);
        match &*self {
            Scene::GameOver(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        match self {
            Scene::Game(state) => Some(state.as_ref()),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        match self {
            Scene::Game(state) => Some(state.as_mut()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codename_from_score() {
        assert_eq!(GameOverScreen::new(0).codename, "Joshua Tree");
        assert_eq!(GameOverScreen::new(18).codename, "McWay");
        assert_eq!(GameOverScreen::new(19).codename, "Joshua Tree");
        assert_eq!(GameOverScreen::new(40).title(), "macOS Alcatraz");
    }

    #[test]
    fn test_codename_cues() {
        assert_eq!(GameOverScreen::new(9).cue, Some(CodenameCue::Oxnard));
        assert_eq!(GameOverScreen::new(10).cue, Some(CodenameCue::RanchoCucamonga));
        assert_eq!(GameOverScreen::new(31).cue, Some(CodenameCue::Weed));
        assert_eq!(GameOverScreen::new(11).cue, None);
    }

    #[test]
    fn test_start_to_game_to_game_over() {
        let layout = SceneLayout::builtin().unwrap();
        let mut scene = Scene::Start;

        assert!(scene.handle_events(&[GameEvent::PresentGameOver { score: 3 }]).is_none());
        assert!(scene.pointer_up(&layout, 1).unwrap());
        assert!(scene.game().is_some());

        // Pointer release during play is a jump, not a scene change
        assert!(!scene.pointer_up(&layout, 2).unwrap());
        assert!(scene.handle_events(&[GameEvent::Jumped]).is_none());

        let screen = scene
            .handle_events(&[
                GameEvent::GameOver { score: 12 },
                GameEvent::PresentGameOver { score: 12 },
            ])
            .cloned();
        assert_eq!(screen.map(|s| s.codename), Some("Weed"));
        assert!(matches!(scene, Scene::GameOver(_)));

        assert!(scene.pointer_up(&layout, 3).unwrap());
        assert_eq!(scene.game().map(|g| g.score), Some(0));
    }
}
