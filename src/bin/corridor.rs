// Corridor generation demo
//
// Grows a pose tree from the origin towards a target 30 m ahead and prints
// the resulting corridor. Set RUST_LOG=debug to watch the search.

use std::f64::consts::FRAC_PI_2;

use corridor_gen::prelude::*;

fn main() -> CorridorResult<()> {
    env_logger::init();

    let constraints = Constraints::new()
        .with(ConstraintKind::Tx, UniformGenerator::new(1.0, 5.0, Some(1.0), false)?)
        .with(ConstraintKind::Ty, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Tz, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Roll, ConstantGenerator::new(0.0))
        .with(ConstraintKind::Yaw, UniformGenerator::new(-FRAC_PI_2, FRAC_PI_2, Some(FRAC_PI_2), true)?)
        .with(ConstraintKind::MaxDepth, ConstantGenerator::new(10.0))
        .with(ConstraintKind::Children, UniformGenerator::new(1.0, 2.0, Some(1.0), true)?);

    let config = PoseGeneratorConfig {
        weights: DistanceWeights::new(1.0, 1.0),
        goal_tolerances: DistanceWeights::new(1.0, 0.5),
        angular_metric: AngularMetric::Dot,
    };
    let generator = PoseGenerator::new(constraints, config)?;
    let mut graph = NodeGraph::new(generator);

    let start = Pose::origin(3)?;
    let target = Pose::from_position_orientation(&[30.0, 0.0, 0.0], &[0.0, 0.0, 0.0])?;

    match graph.generate(start, &target)? {
        Some(mut path) => {
            path.reverse();
            println!("corridor of {} poses, {:.2} m:", path.len(), graph.path_length(&path)?);
            for pose in graph.path_poses(&path)? {
                println!("  {}", pose);
            }
        }
        None => println!("no corridor found ({} nodes explored)", graph.len()),
    }

    let points = graph.rendering_points().count();
    println!("tree walk has {} points", points);
    Ok(())
}
