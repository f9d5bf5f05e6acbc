pub(crate) const RADIUS_EARTH_KM: f64 = 6371.0; // haversine sphere
pub(crate) const RADIUS_EARTH_M: f64 = 6371e3; // map-potential model
pub(crate) const IONOSPHERE_ALTITUDE_M: f64 = 300e3;
pub(crate) const B_FIELD_EQUATORIAL_T: f64 = 31000e-9;

/// UT hour at which magnetic longitude zero sits at local midnight in the map-potential model
pub(crate) const MLT_EPOCH_HOURS: f64 = 4.73;

pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;
pub(crate) const HOURS_PER_DAY: f64 = 24.0;
