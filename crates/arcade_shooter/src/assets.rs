//! Game asset definitions

use arcade_engine::assets::{AssetError, MeshHandle, MeshLoader, MeshRegistry};
use arcade_engine::foundation::math::{Mat4, Mat4Ext, Vec3, FORWARD, RIGHT};

/// Model paths, relative to the asset root
pub mod paths {
    /// Player ship
    pub const PLAYER: &str = "assets/models/jet.obj";
    /// Player cannon barrel
    pub const CANNON: &str = "assets/models/cannon.obj";
    /// Player projectile
    pub const ATTACK: &str = "assets/models/missile.obj";
    /// Enemy boss
    pub const ENEMY: &str = "assets/models/boss.obj";
    /// Enemy bullet
    pub const BULLET: &str = "assets/models/sphere.obj";
    /// Heart satellite around the player
    pub const ORBIT: &str = "assets/models/star.obj";
    /// Boss escort
    pub const ESCORT: &str = "assets/models/starship.obj";
    /// Boss upper arm
    pub const UPPER_ARM: &str = "assets/models/upper_arm.obj";
    /// Boss lower arm
    pub const LOWER_ARM: &str = "assets/models/lower_arm.obj";
    /// Boss hand
    pub const HAND: &str = "assets/models/hand.obj";
}

/// Mesh handles for every entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameAssets {
    /// Player ship
    pub player: MeshHandle,
    /// Player cannon barrel
    pub cannon: MeshHandle,
    /// Player projectile
    pub attack: MeshHandle,
    /// Enemy boss
    pub enemy: MeshHandle,
    /// Enemy bullet
    pub bullet: MeshHandle,
    /// Heart satellite
    pub orbit: MeshHandle,
    /// Boss escort
    pub escort: MeshHandle,
    /// Boss upper arm
    pub upper_arm: MeshHandle,
    /// Boss lower arm
    pub lower_arm: MeshHandle,
    /// Boss hand
    pub hand: MeshHandle,
}

impl GameAssets {
    /// Load every mesh through `registry`, so shared paths load once
    pub fn load(registry: &mut MeshRegistry, loader: &mut dyn MeshLoader) -> Result<Self, AssetError> {
        let assets = Self {
            player: registry.load(loader, paths::PLAYER)?,
            cannon: registry.load(loader, paths::CANNON)?,
            attack: registry.load(loader, paths::ATTACK)?,
            enemy: registry.load(loader, paths::ENEMY)?,
            bullet: registry.load(loader, paths::BULLET)?,
            orbit: registry.load(loader, paths::ORBIT)?,
            escort: registry.load(loader, paths::ESCORT)?,
            upper_arm: registry.load(loader, paths::UPPER_ARM)?,
            lower_arm: registry.load(loader, paths::LOWER_ARM)?,
            hand: registry.load(loader, paths::HAND)?,
        };
        log::debug!("Loaded {} game meshes", registry.len());
        Ok(assets)
    }
}

/// Mesh correction for the Y-up model files: stand the model up, face it
/// toward the viewer and shrink it by `scale`
pub fn upright(scale: f32) -> Mat4 {
    Mat4::scaling(&Vec3::new(scale, scale, scale))
        * Mat4::rotation_deg(-90.0, &RIGHT)
        * Mat4::rotation_deg(180.0, &FORWARD)
}
