pub use crate::error::{Error, Result};
pub use crate::hit::{Batch, Event, Hit, LayerId, TimeWindow};
pub use crate::parameters::{AngleRange, GeometryParameters};
pub use crate::sinogram::{Count, Sinogram};
pub use crate::creator::{Projector, SinogramCreator};
pub use crate::stats::Stats;

pub use geometry::Point;
pub use units::todo::{Anglef32, Lengthf32};
