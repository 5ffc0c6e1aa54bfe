// Binding context and value providers
//
// The binding invocation contract: a value lookup by parameter name plus the
// request's model state. One context lives for the duration of one request.

use std::borrow::Cow;
use std::str::FromStr;

use super::binder::{ArrayModelBinder, ModelBinder, ModelBindingResult, SimpleTypeModelBinder};
use super::metadata::ModelMetadata;
use super::model_state::ModelState;

/// Source of raw textual values, looked up by parameter name.
pub trait ValueProvider {
    /// Raw value for `key`, or `None` when the parameter is absent.
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Value provider over a decoded query string.
///
/// Keys match case-insensitively. A key that occurs more than once yields
/// its values joined with commas, so `?ids=a&ids=b` reads as `"a,b"`.
#[derive(Debug, Clone, Default)]
pub struct QueryValueProvider {
    pairs: Vec<(String, String)>,
}

impl QueryValueProvider {
    /// Decode a raw (still percent-encoded) query string, without the leading `?`.
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }
}

impl ValueProvider for QueryValueProvider {
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        let mut matches = self
            .pairs
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str());

        let first = matches.next()?;
        let rest: Vec<&str> = matches.collect();
        if rest.is_empty() {
            return Some(Cow::Borrowed(first));
        }

        let mut joined = first.to_string();
        for value in rest {
            joined.push(',');
            joined.push_str(value);
        }
        Some(Cow::Owned(joined))
    }
}

/// Per-request binding state handed to every [`ModelBinder`].
pub struct BindingContext<'a> {
    values: &'a dyn ValueProvider,
    model_state: ModelState,
}

impl<'a> BindingContext<'a> {
    pub fn new(values: &'a dyn ValueProvider) -> Self {
        Self {
            values,
            model_state: ModelState::new(),
        }
    }

    /// Raw value for a parameter name.
    pub fn value(&self, name: &str) -> Option<Cow<'a, str>> {
        let values: &'a dyn ValueProvider = self.values;
        values.get_value(name)
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    pub fn model_state_mut(&mut self) -> &mut ModelState {
        &mut self.model_state
    }

    pub fn into_model_state(self) -> ModelState {
        self.model_state
    }

    /// Run `binder` for the parameter `name`.
    pub fn bind<B: ModelBinder>(&mut self, name: &str, binder: &B) -> ModelBindingResult<B::Model> {
        binder.bind_model(name, self)
    }

    /// Bind a delimited collection parameter.
    ///
    /// A failed bind leaves its error in the model state and yields the
    /// default (empty) collection, which callers must not act on while the
    /// model state is invalid.
    pub fn bind_delimited<M>(&mut self, name: &str) -> M
    where
        M: ModelMetadata + Default,
    {
        self.bind(name, &ArrayModelBinder::<M>::new())
            .into_model()
            .unwrap_or_default()
    }

    /// Bind a single-value parameter.
    pub fn bind_value<T>(&mut self, name: &str) -> Option<T>
    where
        T: FromStr,
    {
        self.bind(name, &SimpleTypeModelBinder::<T>::new())
            .into_model()
            .flatten()
    }
}
