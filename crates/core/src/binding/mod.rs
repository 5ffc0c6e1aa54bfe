// Query parameter binding
//
// Converts raw query-string values into typed handler parameters.
// - delimited: the comma-delimited collection algorithm
// - metadata: which target types are delimited collections
// - binder: ArrayModelBinder / SimpleTypeModelBinder and their outcome type
// - context: value providers and the per-request BindingContext
// - model_state: aggregated per-parameter errors

pub mod binder;
pub mod context;
pub mod delimited;
pub mod metadata;
pub mod model_state;

pub use binder::{
    invalid_value_message, ArrayModelBinder, ModelBinder, ModelBindingResult,
    SimpleTypeModelBinder,
};
pub use context::{BindingContext, QueryValueProvider, ValueProvider};
pub use delimited::{join_delimited, parse_delimited, segments, ConversionError, DELIMITER};
pub use metadata::{DelimitedParser, ModelMetadata};
pub use model_state::ModelState;

/// A query model assembled parameter by parameter from a [`BindingContext`].
///
/// Implementations bind each field by name; conversion failures are left in
/// the context's model state for the caller to inspect.
pub trait BindQueryModel: Sized {
    fn bind_from(ctx: &mut BindingContext<'_>) -> Self;
}

/// Bind `M` from a raw query string, returning the model only when every
/// parameter bound cleanly.
pub fn bind_query<M: BindQueryModel>(query: Option<&str>) -> Result<M, ModelState> {
    let provider = QueryValueProvider::from_query(query);
    let mut ctx = BindingContext::new(&provider);
    let model = M::bind_from(&mut ctx);

    let model_state = ctx.into_model_state();
    if model_state.is_valid() {
        Ok(model)
    } else {
        Err(model_state)
    }
}
