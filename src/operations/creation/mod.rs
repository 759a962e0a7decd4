mod footprint;
mod make_gable_roof;
mod make_hip_roof;
mod make_l_roof;
mod make_shed_roof;
mod make_tee_roof;

pub use make_gable_roof::MakeGableRoof;
pub use make_hip_roof::MakeHipRoof;
pub use make_l_roof::MakeLRoof;
pub use make_shed_roof::MakeShedRoof;
pub use make_tee_roof::MakeTeeRoof;
