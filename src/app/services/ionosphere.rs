//! Ionospheric model interface
//!
//! The pipeline treats the electron-density model as an opaque
//! collaborator: one query in, one scalar out. The trait seam keeps the
//! model swappable (a NeQuick binding, a table-driven fit, a test stub)
//! without touching the transformer.

use crate::app::models::ModelQuery;

/// An electron-density model invoked once per observation.
///
/// Implementations must be pure with respect to the query: the same
/// query always yields the same density, which is what makes whole-run
/// output reproducible.
pub trait IonosphericModel {
    /// Electron density (m^-3) for the given observation conditions
    fn electron_density(&self, query: &ModelQuery) -> f64;
}

/// First-order Chapman-layer parameterization of the F2 region.
///
/// A deterministic stand-in for the full NeQuick model: peak density is
/// driven by the F10.7 flux and a solar-zenith proxy built from month,
/// latitude, and local solar time, and the vertical profile is a single
/// Chapman layer. Adequate for exercising the pipeline end to end; not
/// a physics reference.
#[derive(Debug, Clone, Default)]
pub struct ChapmanModel;

// Parameterization constants. The foF2-to-NmF2 conversion is the
// standard 1.24e10 * foF2^2 relation (foF2 in MHz, Ne in m^-3).
const FOF2_SQ_BASE: f64 = 16.0;
const FOF2_SQ_PER_SFU: f64 = 0.5;
const NMF2_PER_FOF2_SQ: f64 = 1.24e10;
const PEAK_HEIGHT_BASE_KM: f64 = 250.0;
const PEAK_HEIGHT_PER_SFU: f64 = 0.2;
const SCALE_HEIGHT_KM: f64 = 50.0;
const NIGHT_FLOOR: f64 = 0.1;
const EARTH_TILT_DEG: f64 = 23.44;

impl IonosphericModel for ChapmanModel {
    fn electron_density(&self, query: &ModelQuery) -> f64 {
        let nm_f2 = NMF2_PER_FOF2_SQ
            * (FOF2_SQ_BASE + FOF2_SQ_PER_SFU * query.solar_flux)
            * self.zenith_factor(query);

        let hm_f2 = PEAK_HEIGHT_BASE_KM + PEAK_HEIGHT_PER_SFU * query.solar_flux;

        // Chapman layer profile around the F2 peak
        let z = (query.altitude_km - hm_f2) / SCALE_HEIGHT_KM;
        nm_f2 * (0.5 * (1.0 - z - (-z).exp())).exp()
    }
}

impl ChapmanModel {
    /// Daytime ionization proxy from solar zenith angle, clipped to a
    /// small nighttime floor so densities never vanish entirely.
    fn zenith_factor(&self, query: &ModelQuery) -> f64 {
        let declination =
            (-EARTH_TILT_DEG * (std::f64::consts::TAU * (query.month as f64 - 0.5) / 12.0).cos())
                .to_radians();
        let latitude = query.latitude.to_radians();

        // Local solar time from the time-of-day input and longitude
        let local_solar_hours =
            (query.local_time_hours + query.longitude / 15.0).rem_euclid(24.0);
        let hour_angle = (local_solar_hours - 12.0) / 24.0 * std::f64::consts::TAU;

        let cos_zenith = latitude.sin() * declination.sin()
            + latitude.cos() * declination.cos() * hour_angle.cos();

        cos_zenith.max(NIGHT_FLOOR).powf(0.6)
    }
}
