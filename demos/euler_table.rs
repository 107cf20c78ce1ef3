//! Print one orientation in every decomposable Euler sequence
//!
//! Run with: RUST_LOG=info cargo run --example euler_table

use rot3d::{Axis, EulerSequence, Quaternion};

/// `q` and `-q` describe the same rotation
fn same_rotation(p: Quaternion, q: Quaternion) -> bool {
    p.approx_eq(&q, 1e-9) || p.approx_eq(&-q, 1e-9)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let q = Quaternion::from_axis_angle([1.0, 1.0, 0.5], 1.2)?;
    log::info!("Orientation {}", q);

    let axes = [Axis::X, Axis::Y, Axis::Z];
    for &first in &axes {
        for &second in &axes {
            for &third in &axes {
                let sequence = EulerSequence::new(first, second, third);
                if !sequence.is_decomposable() {
                    continue;
                }
                for extrinsic in [false, true] {
                    let angles = q.to_euler_sequence(sequence, extrinsic, rot3d::EPSILON)?;
                    let back = Quaternion::from_euler_sequence(angles, sequence, extrinsic);
                    log::info!(
                        "{} {:<10} {:>8.3} {:>8.3} {:>8.3}  round trip {}",
                        sequence,
                        if extrinsic { "extrinsic" } else { "intrinsic" },
                        angles[0].to_degrees(),
                        angles[1].to_degrees(),
                        angles[2].to_degrees(),
                        if same_rotation(back, q) { "ok" } else { "MISMATCH" }
                    );
                }
            }
        }
    }

    Ok(())
}
