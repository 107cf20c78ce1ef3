//! Place an antenna frame from pointing directions and report where it looks
//!
//! Run with: cargo run --example orient_antenna
//! Override the tolerance with ROT3D_TOLERANCE__EPSILON=1e-6
//! and the log level with ROT3D_DEBUG__LOG_LEVEL=debug

use rot3d::{FrameBuilder, Rot3dConfig, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Rot3dConfig::load_or_default();
    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    let builder = FrameBuilder::new(&config)?;

    // Mast-mounted antenna tilted 30 degrees below the horizon, facing +y
    let tilt = 30f64.to_radians();
    let look = Vec3::new(0.0, tilt.cos(), -tilt.sin());
    let antenna = builder.from_pointing("antenna", [0.0, 0.0, 25.0], look, Vec3::Z)?;

    let (x, y, z) = antenna.axes()?;
    log::info!("Antenna orientation {}", antenna.orientation);
    log::info!("  boresight {:?}", x.to_array());
    log::info!("  up        {:?}", y.to_array());
    log::info!("  side      {:?}", z.to_array());

    // Where the boresight meets the ground plane
    let height = antenna.origin.z;
    let range = height / tilt.sin();
    let footprint = antenna.to_global([range, 0.0, 0.0])?;
    log::info!("Boresight hits ground at {:?} after {:.2} m", footprint.to_array(), range);

    let (axis, angle) = antenna.orientation.to_axis_angle()?;
    log::info!(
        "Equivalent rotation: {:.2} deg about {:?}",
        angle.to_degrees(),
        axis.to_array()
    );

    let angles = builder.euler_angles(&antenna)?;
    log::info!(
        "Euler angles ({} {}): {:?} deg",
        builder.sequence(),
        if builder.extrinsic() { "extrinsic" } else { "intrinsic" },
        angles.map(f64::to_degrees)
    );

    Ok(())
}
