// Model binders
//
// ArrayModelBinder binds delimited collection parameters; SimpleTypeModelBinder
// is the default single-value binding used for everything else.

use std::marker::PhantomData;
use std::str::FromStr;

use super::context::BindingContext;
use super::metadata::ModelMetadata;

/// Outcome of one bind operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelBindingResult<M> {
    /// The model was bound (possibly to an empty collection).
    Success(M),
    /// The raw value could not be converted; an error was added to the model state.
    Failed,
    /// The binder does not handle this target type and did nothing.
    NotApplicable,
}

impl<M> ModelBindingResult<M> {
    pub fn into_model(self) -> Option<M> {
        match self {
            ModelBindingResult::Success(model) => Some(model),
            ModelBindingResult::Failed | ModelBindingResult::NotApplicable => None,
        }
    }
}

/// Binds one named parameter from a [`BindingContext`].
pub trait ModelBinder {
    /// The declared parameter type.
    type Model;

    fn bind_model(
        &self,
        name: &str,
        ctx: &mut BindingContext<'_>,
    ) -> ModelBindingResult<Self::Model>;
}

/// Model-state message for a value that could not be converted.
pub fn invalid_value_message(value: &str, name: &str) -> String {
    format!("The value '{value}' is not valid for {name}.")
}

/// Binds a comma-delimited query value into a collection model `M`.
pub struct ArrayModelBinder<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> ArrayModelBinder<M> {
    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for ArrayModelBinder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ModelMetadata> ModelBinder for ArrayModelBinder<M> {
    type Model = M;

    fn bind_model(&self, name: &str, ctx: &mut BindingContext<'_>) -> ModelBindingResult<M> {
        let Some(parse) = M::delimited_parser() else {
            tracing::debug!(parameter = %name, "Delimited binding not applicable to target type");
            return ModelBindingResult::NotApplicable;
        };

        let raw = ctx.value(name);
        match parse(raw.as_deref()) {
            Ok(model) => ModelBindingResult::Success(model),
            Err(e) => {
                tracing::debug!(parameter = %name, error = %e, "Delimited binding failed");
                ctx.model_state_mut()
                    .add_model_error(name, invalid_value_message(&e.segment, name));
                ModelBindingResult::Failed
            }
        }
    }
}

/// Binds a single raw value through `T::from_str`.
///
/// Absent and blank values bind to `None`; the value is trimmed before conversion.
pub struct SimpleTypeModelBinder<T> {
    _model: PhantomData<fn() -> T>,
}

impl<T> SimpleTypeModelBinder<T> {
    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<T> Default for SimpleTypeModelBinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromStr> ModelBinder for SimpleTypeModelBinder<T> {
    type Model = Option<T>;

    fn bind_model(
        &self,
        name: &str,
        ctx: &mut BindingContext<'_>,
    ) -> ModelBindingResult<Option<T>> {
        let Some(raw) = ctx.value(name) else {
            return ModelBindingResult::Success(None);
        };

        let value = raw.trim();
        if value.is_empty() {
            return ModelBindingResult::Success(None);
        }

        match value.parse::<T>() {
            Ok(model) => ModelBindingResult::Success(Some(model)),
            Err(_) => {
                ctx.model_state_mut()
                    .add_model_error(name, invalid_value_message(value, name));
                ModelBindingResult::Failed
            }
        }
    }
}
