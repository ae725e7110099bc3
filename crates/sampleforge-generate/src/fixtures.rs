use std::collections::BTreeMap;

use rand::RngCore;
use serde_json::{Map, Value};
use tracing::debug;

use sampleforge_core::ItemMode;

use crate::datagen::DataGenerator;
use crate::errors::EvaluationError;
use crate::expr::{Argument, ValueExpression};
use crate::model::GeneratedAccessor;

/// Concrete JSON samples for every accessor of one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: BTreeMap<String, Vec<Value>>,
}

impl SampleStore {
    /// Evaluate every accessor. Random-mode values draw from `rng`;
    /// named references resolve to the first sample of their type.
    pub fn materialize(
        accessors: &[GeneratedAccessor],
        rng: &mut dyn RngCore,
    ) -> Result<Self, EvaluationError> {
        let mut evaluator = Evaluator {
            accessors: accessors
                .iter()
                .map(|accessor| (accessor.declaration.as_str(), accessor))
                .collect(),
            samples: BTreeMap::new(),
            in_progress: Vec::new(),
            rng,
        };
        for accessor in accessors {
            evaluator.ensure(&accessor.declaration)?;
        }
        Ok(Self {
            samples: evaluator.samples,
        })
    }

    pub fn get(&self, declaration: &str) -> Option<&[Value]> {
        self.samples.get(declaration).map(Vec::as_slice)
    }

    pub fn first(&self, declaration: &str) -> Option<&Value> {
        self.get(declaration).and_then(<[Value]>::first)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One JSON object keyed by declaration name.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.samples
                .iter()
                .map(|(name, samples)| (name.clone(), Value::Array(samples.clone())))
                .collect(),
        )
    }
}

struct Evaluator<'a, 'r> {
    accessors: BTreeMap<&'a str, &'a GeneratedAccessor>,
    samples: BTreeMap<String, Vec<Value>>,
    in_progress: Vec<String>,
    rng: &'r mut dyn RngCore,
}

impl Evaluator<'_, '_> {
    fn ensure(&mut self, name: &str) -> Result<(), EvaluationError> {
        if self.samples.contains_key(name) {
            return Ok(());
        }
        if let Some(start) = self.in_progress.iter().position(|open| open == name) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(name.to_string());
            return Err(EvaluationError::CyclicReference { chain });
        }
        let accessor = *self
            .accessors
            .get(name)
            .ok_or_else(|| EvaluationError::UnresolvedNamedType {
                name: name.to_string(),
            })?;

        self.in_progress.push(name.to_string());
        let mut values = Vec::with_capacity(accessor.items.len());
        for item in &accessor.items {
            values.push(self.evaluate(item)?);
        }
        self.in_progress.pop();

        debug!(declaration = %name, samples = values.len(), "samples materialized");
        self.samples.insert(name.to_string(), values);
        Ok(())
    }

    fn evaluate(&mut self, expression: &ValueExpression) -> Result<Value, EvaluationError> {
        let value = match expression {
            ValueExpression::Provider(call) => {
                let generator = DataGenerator::for_mode(call.mode).with_tag(call.category.clone());
                let value = match call.mode {
                    ItemMode::Deterministic(_) => generator.value(call.kind),
                    ItemMode::Random => generator.value_from(call.kind, &mut *self.rng),
                };
                value.to_json()
            }
            ValueExpression::Sequence { elements } => Value::Array(
                elements
                    .iter()
                    .map(|element| self.evaluate(element))
                    .collect::<Result<_, _>>()?,
            ),
            ValueExpression::Mapping { entries } => {
                let mut map = Map::new();
                for (key, value) in entries {
                    let key = match self.evaluate(key)? {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    let value = self.evaluate(value)?;
                    map.insert(key, value);
                }
                Value::Object(map)
            }
            ValueExpression::SampleRef { type_name } => {
                self.ensure(type_name)?;
                self.samples
                    .get(type_name)
                    .and_then(|samples| samples.first())
                    .cloned()
                    .ok_or_else(|| EvaluationError::UnresolvedNamedType {
                        name: type_name.clone(),
                    })?
            }
            ValueExpression::Construct { arguments, .. } => {
                Value::Object(self.fields(arguments)?)
            }
            ValueExpression::Variant { tag, arguments } => {
                if arguments.is_empty() {
                    Value::String(tag.clone())
                } else {
                    let payload = if arguments.iter().all(|arg| arg.label.is_some()) {
                        Value::Object(self.fields(arguments)?)
                    } else {
                        let mut values = arguments
                            .iter()
                            .map(|arg| self.evaluate(&arg.value))
                            .collect::<Result<Vec<_>, _>>()?;
                        if values.len() == 1 {
                            values.remove(0)
                        } else {
                            Value::Array(values)
                        }
                    };
                    let mut map = Map::new();
                    map.insert(tag.clone(), payload);
                    Value::Object(map)
                }
            }
        };
        Ok(value)
    }

    fn fields(&mut self, arguments: &[Argument]) -> Result<Map<String, Value>, EvaluationError> {
        let mut map = Map::new();
        for (position, argument) in arguments.iter().enumerate() {
            let key = argument
                .label
                .clone()
                .unwrap_or_else(|| position.to_string());
            let value = self.evaluate(&argument.value)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
