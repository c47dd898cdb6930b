mod cockpit;
mod error;
mod export;
mod profile;
mod types;

pub use cockpit::{localizer_angle, papi_indication, CockpitRenderer};
pub use error::RenderError;
pub use export::{
    read_outcome_json, to_rgba_image, write_gif, write_outcome_json, write_png_sequence,
};
pub use profile::{render_profile, write_profile_png};
pub use types::{PapiLight, RenderConfig};
