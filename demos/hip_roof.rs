//! Lays trusses out on a 30 x 10 hip roof standing on four walls.
//!
//! Usage:
//! ```text
//! cargo run --example hip_roof
//! RUST_LOG=roof_truss=debug cargo run --example hip_roof
//! ```

use roof_truss::classify::ClassifyRoof;
use roof_truss::distribution::{RecordingSink, TrussDistributor};
use roof_truss::math::Point3;
use roof_truss::operations::creation::MakeHipRoof;
use roof_truss::settings::{DistributionSettings, TrussTypeId};
use roof_truss::support::SupportCatalog;
use roof_truss::topology::FaceSide;
use roof_truss::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for roof_truss.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("hip_roof=info".parse().unwrap_or_default())
        .add_directive("roof_truss=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let op = MakeHipRoof::new(Point3::new(0.0, 0.0, 10.0), 30.0, 10.0, 1.0);
    let roof = op.execute()?;
    let walls: SupportCatalog = op.supporting_walls()?.into_iter().collect();

    for edge in ClassifyRoof::new(&roof, FaceSide::Bottom).execute()? {
        tracing::info!(line_type = ?edge.line_type, length = edge.curve.length(), "edge");
    }

    let settings = DistributionSettings::default().with_truss_type(TrussTypeId(42));
    let mut sink = RecordingSink::new();
    let trusses = TrussDistributor::new(&roof, &walls)
        .settings(settings)
        .distribute_roof(&mut sink)?;

    for (truss, placed) in trusses.iter().zip(&sink.placed) {
        tracing::info!(
            id = placed.id.0,
            apex = ?truss.apex,
            height = truss.height,
            kind = ?truss.kind,
            "truss placed"
        );
    }
    tracing::info!(placed = sink.placed.len(), markers = sink.debug_points.len(), "done");
    Ok(())
}
