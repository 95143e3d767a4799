use std::error::Error;

use rpy_extract::{
    rotation_to_rpy_batch, rpy_to_transform, EulerAngles, Matrix, RotationSequence, RpyOptions,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A batch of matrices with the options to extract them with.
#[derive(Deserialize, Debug)]
struct Request {
    #[serde(default)]
    options: RpyOptions,
    matrices: Vec<Matrix>,
}

#[derive(Serialize, Debug)]
struct Response {
    sequence: RotationSequence,
    angles: Vec<EulerAngles>,
}

/// Tool poses in degrees: W, P, R style triples with a translation in mm.
fn demo_request() -> Request {
    let degrees = RpyOptions::new(true, RotationSequence::Zyx);
    let poses = [
        ([0.0, 0.0, 0.0], [0.0, 0.0, 500.0]),
        ([180.0, 0.0, 0.0], [450.0, 0.0, 300.0]),
        ([30.0, -45.0, 60.0], [300.0, -150.0, 420.0]),
        // wrist flipped onto the gimbal lock
        ([15.0, 90.0, 40.0], [600.0, 0.0, 200.0]),
    ];

    let matrices = poses
        .iter()
        .map(|(wpr, xyz)| rpy_to_transform(&EulerAngles::from(*wpr), *xyz, &degrees).into())
        .collect();

    Request {
        options: degrees,
        matrices,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let request = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading matrices from {}", path);
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str::<Request>(&text)?
        }
        None => {
            info!("No input file given, using built-in demo poses");
            demo_request()
        }
    };

    let (angles, sequence) = match rotation_to_rpy_batch(&request.matrices, &request.options) {
        Ok(result) => result,
        Err(e) => {
            warn!("Extraction failed: {}", e);
            return Err(e.into());
        }
    };
    info!("Extracted {} poses using {}", angles.len(), sequence);

    println!("{}", serde_json::to_string_pretty(&Response { sequence, angles })?);

    // Same input, every other convention, for comparison
    for other in RotationSequence::ALL.into_iter().filter(|s| *s != sequence) {
        let options = request.options.with_sequence(other);
        let (angles, _) = rotation_to_rpy_batch(&request.matrices, &options)?;
        for (i, a) in angles.iter().enumerate() {
            println!(
                "{:>3} [{}/{:<7}] {:>10.4} {:>10.4} {:>10.4}",
                i,
                other,
                other.alias(),
                a.angle1,
                a.angle2,
                a.angle3
            );
        }
    }

    Ok(())
}
