//! Integration tests for world transform composition and re-parenting

use arcade_engine::foundation::math::Mat4Ext;
use arcade_engine::prelude::*;
use approx::assert_relative_eq;

fn uniform(size: f32) -> Vec3 {
    Vec3::new(size, size, size)
}

#[test]
fn test_three_level_world_transform_composition() {
    let mut graph = SceneGraph::new();
    let root = graph.root();

    let a = graph.create_child(root, Node::new(Vec3::new(1.0, 0.0, 0.0), 90.0, FORWARD, uniform(2.0)));
    let b = graph.create_child(a, Node::new(Vec3::new(1.0, 0.0, 0.0), 45.0, UP, uniform(1.0)));
    let c = graph.create_child(b, Node::new(Vec3::new(0.0, 1.0, 0.0), 0.0, UP, Vec3::new(1.0, 3.0, 1.0)));

    let expected = *graph[a].local_matrix() * *graph[b].local_matrix() * *graph[c].local_matrix();
    assert_relative_eq!(graph.world_transform(c), expected, epsilon = 1e-5);

    // A rotates +X onto +Y and doubles lengths, so B sits at (1, 2, 0)
    assert_relative_eq!(graph.world_position(b), Vec3::new(1.0, 2.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_world_transform_tracks_parent_changes() {
    let mut graph = SceneGraph::new();
    let parent = graph.create_node(Node::at(Vec3::new(5.0, 0.0, 0.0)));
    let child = graph.create_child(parent, Node::at(Vec3::new(0.0, 1.0, 0.0)));

    graph[parent].translate(Vec3::new(0.0, 0.0, -2.0));
    assert_relative_eq!(graph.world_position(child), Vec3::new(5.0, 1.0, -2.0), epsilon = 1e-6);
}

#[test]
fn test_reparent_with_preserved_pose_does_not_move() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let first = graph.create_child(root, Node::new(Vec3::new(3.0, -2.0, 0.0), 30.0, FORWARD, uniform(1.5)));
    let second = graph.create_child(root, Node::new(Vec3::new(-4.0, 7.0, 1.0), -60.0, UP, Vec3::new(2.0, 1.0, 0.5)));
    let node = graph.create_child(first, Node::new(Vec3::new(1.0, 1.0, 0.0), 10.0, RIGHT, uniform(1.0)));

    let before = graph.world_transform(node);
    graph.set_parent(node, Some(second), true);

    assert_eq!(graph.parent(node), Some(second));
    assert!(graph.children(first).is_empty());
    assert_relative_eq!(graph.world_transform(node), before, epsilon = 1e-4);
}

#[test]
fn test_reparent_without_preserve_keeps_local() {
    let mut graph = SceneGraph::new();
    let first = graph.create_node(Node::at(Vec3::new(10.0, 0.0, 0.0)));
    let second = graph.create_node(Node::at(Vec3::new(-10.0, 0.0, 0.0)));
    let node = graph.create_child(first, Node::at(Vec3::new(1.0, 0.0, 0.0)));

    graph.set_parent(node, Some(second), false);
    assert_relative_eq!(graph.world_position(node), Vec3::new(-9.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_detach_to_world_bakes_world_pose() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let carrier = graph.create_child(root, Node::new(Vec3::new(0.0, 20.0, 0.0), 90.0, FORWARD, uniform(1.0)));
    let escort = graph.create_child(carrier, Node::at(Vec3::new(4.0, 0.0, 0.0)));
    let before = graph.world_transform(escort);

    graph.set_parent(escort, Some(root), true);
    graph[carrier].translate_world(Vec3::new(0.0, -10.0, 0.0));

    assert_eq!(graph.parent(escort), Some(root));
    assert_relative_eq!(graph.world_transform(escort), before, epsilon = 1e-5);
    assert_relative_eq!(graph.world_position(escort), Vec3::new(0.0, 24.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_unparent_bakes_world_into_local() {
    let mut graph = SceneGraph::new();
    let parent = graph.create_node(Node::new(Vec3::new(2.0, 0.0, 0.0), 0.0, UP, uniform(3.0)));
    let child = graph.create_child(parent, Node::at(Vec3::new(1.0, 0.0, 0.0)));

    graph.set_parent(child, None, false);
    assert_eq!(graph.parent(child), None);
    assert_relative_eq!(graph[child].local_matrix().position(), Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_collision_is_symmetric_in_world_space() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let ship = graph.create_child(root, Node::at(Vec3::new(0.0, -10.0, 0.0)));
    let gun = graph.create_child(ship, Node::at(Vec3::new(0.8, 0.2, 0.0)).with_hitbox_radius(0.5));
    let shot = graph.create_child(root, Node::at(Vec3::new(1.2, -9.5, 0.0)).with_hitbox_radius(0.5));
    let far = graph.create_child(root, Node::at(Vec3::new(1.2, 9.5, 0.0)).with_hitbox_radius(0.5));

    assert!(graph.check_collision(gun, shot));
    assert!(graph.check_collision(shot, gun));
    assert!(!graph.check_collision(gun, far));
    assert!(!graph.check_collision(far, gun));
}

#[test]
fn test_recursive_flags_hide_attachments() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let mesh = MeshHandle::from_raw(1);
    let boss = graph.create_child(root, Node::default().with_appearance(Appearance::new(mesh)));
    let wing = graph.create_child(boss, Node::default().with_appearance(Appearance::new(mesh)));

    graph.set_active_recursive(boss, false);
    assert!(!graph[wing].is_active());

    let mut renderer = RecordingRenderer::new();
    graph.draw(root, &mut renderer);
    assert!(renderer.is_empty());

    graph.set_active_recursive(boss, true);
    graph.draw(root, &mut renderer);
    assert_eq!(renderer.len(), 2);
}
