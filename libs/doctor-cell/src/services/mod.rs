pub mod fallback;
pub mod filter;
pub mod repository;
pub mod search;
pub mod selection;
pub mod session;

pub use fallback::fallback_roster;
pub use filter::{available_languages, available_specialties, derive, DoctorFilterEngine};
pub use repository::{DoctorRepository, DoctorStore, SupabaseDoctorStore};
pub use selection::DoctorSelectionState;
pub use session::DiscoverySession;
