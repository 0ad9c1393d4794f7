use axum::Router;

/// A backend module that contributes HTTP routes.
///
/// The binary entry point collects all modules and nests each one's routes
/// under `/{name}`.
pub trait Module: Send + Sync {
    /// Module name, used for logging and the route prefix.
    fn name(&self) -> &str;

    /// Return the module's routes, relative to the module prefix.
    fn routes(&self) -> Router;
}
