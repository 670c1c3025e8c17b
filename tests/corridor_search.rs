use corridor_gen::prelude::*;

/// Every expansion draws the whole step pool {1, 2, 3}, so a node short of
/// the target always has a child that undershoots or lands exactly on it.
fn forward_constraints() -> Constraints {
    Constraints::new()
        .with(ConstraintKind::Yaw, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Tx, UniformGenerator::new(1.0, 3.0, Some(1.0), false).unwrap())
        .with(ConstraintKind::Ty, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Tz, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Children, ConstantGenerator::new(3.0))
        .with(ConstraintKind::MaxDepth, ConstantGenerator::new(12.0))
}

fn pose_at(x: f64) -> Pose {
    Pose::from_position_orientation(&[x, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap()
}

#[test]
fn forward_corridor_reaches_target() {
    let config = PoseGeneratorConfig {
        goal_tolerances: DistanceWeights::new(0.1, 0.5),
        angular_metric: AngularMetric::Cosine,
        ..PoseGeneratorConfig::default()
    };
    let generator = PoseGenerator::with_seed(forward_constraints(), config, 2024).unwrap();
    let mut graph = NodeGraph::new(generator);
    let target = pose_at(10.0);

    let mut path = graph
        .generate(Pose::origin(3).unwrap(), &target)
        .unwrap()
        .expect("integer forward steps land on x = 10");
    path.reverse();

    let poses = graph.path_poses(&path).unwrap();
    assert_eq!(poses.first().unwrap().position(), Pose::origin(3).unwrap().position());
    assert_eq!(*poses.last().unwrap(), &target);

    // monotone progress along x, never leaving the axis
    for pair in poses.windows(2) {
        let (a, b) = (pair[0].position(), pair[1].position());
        assert!(b[0] > a[0]);
        assert!(b[1].abs() < 1e-12 && b[2].abs() < 1e-12);
    }

    for window in path.windows(2) {
        let child = graph.node(window[1]).unwrap();
        assert_eq!(child.parent(), Some(window[0]));
        assert!(child.is_on_target_path());
    }
    assert!((graph.path_length(&path).unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn corridor_segments_clear_an_obstacle_box() {
    let generator =
        PoseGenerator::with_seed(forward_constraints(), PoseGeneratorConfig::default(), 7).unwrap();
    let mut graph = NodeGraph::new(generator);
    let mut path = graph
        .generate(Pose::origin(3).unwrap(), &pose_at(6.0))
        .unwrap()
        .unwrap();
    path.reverse();

    // a box sitting beside the corridor axis
    let obstacle = BoundingBox::new(
        nalgebra::Vector3::new(0.0, 1.0, -1.0),
        nalgebra::Vector3::new(10.0, 2.0, 1.0),
        None,
    )
    .unwrap();

    let poses = graph.path_poses(&path).unwrap();
    for pair in poses.windows(2) {
        let segment = Line::segment(pair[0].position().clone(), pair[1].position().clone()).unwrap();
        assert!(!obstacle.ray_intersect_world(&segment).unwrap());
    }
}
