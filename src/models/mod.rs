//! Procedural builders for the decorative models.
//!
//! Each builder is a pure function of fixed parameters that returns the model's
//! [`ModelNode`](crate::ModelNode) together with handles to the parts the animation driver
//! moves. Builders never touch a render target.
//!
//! | Model | Where it appears |
//! |-------|------------------|
//! | [`Robot`] | background scene |
//! | [`Spaceship`] | background scene |
//! | [`Crystal`] | background scene |
//! | [`Sculpture`] | about showcase |
//! | [`DnaHelix`] | first project showcase |
//! | [`Atom`] | second project showcase |
//! | [`Flower`] | third project showcase |

pub mod atom;
pub mod crystal;
pub mod flower;
pub mod helix;
pub mod robot;
pub mod sculpture;
pub mod spaceship;

pub use atom::Atom;
pub use crystal::Crystal;
pub use flower::Flower;
pub use helix::DnaHelix;
pub use robot::Robot;
pub use sculpture::Sculpture;
pub use spaceship::Spaceship;
