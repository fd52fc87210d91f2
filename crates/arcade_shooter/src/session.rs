//! Game session: world ownership, fixed-step loop and win/lose state

use arcade_engine::assets::{MeshLoader, MeshRegistry};
use arcade_engine::prelude::*;

use crate::assets::GameAssets;
use crate::config::GameConfig;
use crate::entities::{Enemy, Player};
use crate::error::GameResult;
use crate::input::InputState;

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Round in progress
    Playing,
    /// Every enemy destroyed
    Won,
    /// Player out of hearts
    Lost,
}

impl GameState {
    /// Check if the round has ended
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// One round of the shooter
///
/// Owns the scene graph and every entity in it. Each fixed step runs, in
/// order: enemies resolve player projectiles and update, the player
/// resolves enemy bullets and updates, then the win/lose check.
#[derive(Debug)]
pub struct GameSession {
    graph: SceneGraph,
    meshes: MeshRegistry,
    assets: GameAssets,
    config: GameConfig,
    player: Player,
    enemies: Vec<Enemy>,
    clock: FrameClock,
    state: GameState,
    simulated_time: f32,
}

impl GameSession {
    /// Load meshes and spawn the player and every enemy
    pub fn new(config: GameConfig, loader: &mut dyn MeshLoader) -> GameResult<Self> {
        config.validate()?;

        let mut meshes = MeshRegistry::new();
        let assets = GameAssets::load(&mut meshes, loader)?;

        let mut graph = SceneGraph::new();
        let player = Player::spawn(&mut graph, &assets, &config.player, &config.cannon, config.world);
        let enemies: Vec<Enemy> = config
            .enemy
            .spawn_points
            .iter()
            .map(|spawn| Enemy::spawn(&mut graph, *spawn, &assets, &config))
            .collect();

        log::info!(
            "Session ready: {} enemies, {} scene nodes",
            enemies.len(),
            graph.len()
        );

        Ok(Self {
            graph,
            meshes,
            assets,
            clock: FrameClock::new(config.fixed_timestep),
            config,
            player,
            enemies,
            state: GameState::Playing,
            simulated_time: 0.0,
        })
    }

    /// Hand the frame's input to the player; ignored once the round is over
    pub fn apply_input(&mut self, input: &InputState) {
        if self.state == GameState::Playing {
            self.player.apply_input(input);
        }
    }

    /// Feed `delta_time` seconds into the clock and run every step now due
    ///
    /// Returns the number of fixed steps run.
    pub fn step(&mut self, delta_time: f32) -> u32 {
        let steps = self.clock.advance(delta_time);
        let fixed_step = self.clock.fixed_step();
        for _ in 0..steps {
            self.fixed_update(fixed_step);
        }
        steps
    }

    /// Run exactly one simulation step of `delta_time` seconds
    pub fn fixed_update(&mut self, delta_time: f32) {
        if self.state.is_over() {
            return;
        }

        for enemy in &mut self.enemies {
            enemy.take_hits(&mut self.graph, self.player.cannons_mut());
            enemy.update(&mut self.graph, delta_time);
        }

        self.player.take_hits(&mut self.graph, &mut self.enemies);
        self.player.update(&mut self.graph, delta_time);

        self.simulated_time += delta_time;
        self.check_state();
    }

    fn check_state(&mut self) {
        let next = if self.enemies.iter().all(Enemy::is_destroyed) {
            GameState::Won
        } else if !self.player.is_alive() {
            GameState::Lost
        } else {
            GameState::Playing
        };

        if next == self.state {
            return;
        }

        log::info!("Game over after {:.2}s: {next:?}", self.simulated_time);
        self.state = next;
        self.release_projectiles();
    }

    fn release_projectiles(&mut self) {
        for cannon in self.player.cannons_mut() {
            cannon.attacks_mut().release_all(&mut self.graph);
        }
        for enemy in &mut self.enemies {
            enemy.bullets_mut().release_all(&mut self.graph);
        }
    }

    /// Draw the whole scene
    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.graph.draw(self.graph.root(), renderer);
    }

    /// Start the round over with fresh entities
    pub fn reset(&mut self) {
        self.player.reset(&mut self.graph);
        for enemy in &mut self.enemies {
            enemy.reset(&mut self.graph);
        }
        self.clock.reset();
        self.state = GameState::Playing;
        self.simulated_time = 0.0;
        log::info!("Session reset");
    }

    /// Current round state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The player ship
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Every enemy, destroyed or not
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Mutable enemies, for scripted scenarios
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// The scene graph
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable scene graph together with the enemies, for scripted scenarios
    pub fn graph_and_enemies_mut(&mut self) -> (&mut SceneGraph, &mut [Enemy]) {
        (&mut self.graph, &mut self.enemies)
    }

    /// Mesh handles in use
    pub fn assets(&self) -> &GameAssets {
        &self.assets
    }

    /// Number of distinct meshes loaded
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Simulated seconds since the round started
    pub fn simulated_time(&self) -> f32 {
        self.simulated_time
    }
}
