//! Plan engine.
//!
//! The engine owns one compiled modifier chain per declared attribute and
//! runs them against each resource instance's tentative plan. It is
//! immutable once built, so a single engine can plan many instances at once.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::modifier::ModifierChain;
use crate::schema::{AttributeSchema, ProviderSchema};
use crate::state::{PlanDocument, StateDocument};
use crate::value::{json_kind, AttributeShape, AttributeValue, ObjectValue, ShapeKind};

use super::diff::{detect_changes, PlanAction};
use super::plan::{ProviderPlan, ResourcePlan};
use super::resource::ResourceInstance;

/// Modifier chain bound to the attribute's declared shape.
#[derive(Debug)]
enum AttributeRules {
    /// String-like attribute.
    Scalar(ModifierChain<String>),
    /// Object-like attribute.
    Structured(ModifierChain<ObjectValue>),
}

/// A declared attribute with its compiled chain.
#[derive(Debug)]
struct CompiledAttribute {
    /// Attribute name.
    name: String,
    /// Modifiers in execution order.
    rules: AttributeRules,
}

/// Engine that applies plan modifiers to tentative plans.
#[derive(Debug)]
pub struct PlanEngine {
    /// Provider name.
    provider: String,
    /// Compiled attributes per resource type, in schema order.
    resources: HashMap<String, Vec<CompiledAttribute>>,
}

impl CompiledAttribute {
    fn compile(schema: &AttributeSchema) -> Self {
        let rules = match schema.shape {
            ShapeKind::Scalar => AttributeRules::Scalar(schema.chain()),
            ShapeKind::Structured => AttributeRules::Structured(schema.chain()),
        };
        Self {
            name: schema.name.clone(),
            rules,
        }
    }
}

impl PlanEngine {
    /// Compiles an engine from a provider schema.
    #[must_use]
    pub fn from_schema(schema: &ProviderSchema) -> Self {
        let resources = schema
            .resources
            .iter()
            .map(|resource| {
                let attributes = resource
                    .attributes
                    .iter()
                    .map(CompiledAttribute::compile)
                    .collect();
                (resource.resource_type.clone(), attributes)
            })
            .collect();

        Self {
            provider: schema.provider.clone(),
            resources,
        }
    }

    /// Computes the final plan for one resource instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource type or an attribute is not declared,
    /// a declared attribute is missing from the tentative plan, or a value
    /// does not match its declared shape.
    pub fn plan_resource(&self, instance: &ResourceInstance) -> Result<ResourcePlan> {
        let attributes = self.resources.get(&instance.resource_type).ok_or_else(|| {
            PlanError::UnknownResourceType {
                address: instance.address.clone(),
                resource_type: instance.resource_type.clone(),
            }
        })?;

        if let Some(extra) = instance
            .tentative_plan
            .keys()
            .find(|name| !attributes.iter().any(|a| &a.name == *name))
        {
            return Err(PlanError::UnknownAttribute {
                address: instance.address.clone(),
                attribute: extra.clone(),
            }
            .into());
        }

        debug!(
            "Planning {} ({})",
            instance.address,
            if instance.is_new() { "new" } else { "existing" }
        );

        let mut planned = BTreeMap::new();
        for attribute in attributes {
            let tentative = instance
                .tentative_plan
                .get(&attribute.name)
                .cloned()
                .ok_or_else(|| PlanError::MissingAttribute {
                    address: instance.address.clone(),
                    attribute: attribute.name.clone(),
                })?;
            let prior = instance.prior_value(&attribute.name);

            let value = match &attribute.rules {
                AttributeRules::Scalar(chain) => {
                    reconcile(chain, &instance.address, &attribute.name, prior, tentative)?
                }
                AttributeRules::Structured(chain) => {
                    reconcile(chain, &instance.address, &attribute.name, prior, tentative)?
                }
            };
            planned.insert(attribute.name.clone(), value);
        }

        let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
        let (action, changes) = detect_changes(instance.prior_state.as_ref(), &names, &planned);

        Ok(ResourcePlan {
            address: instance.address.clone(),
            resource_type: instance.resource_type.clone(),
            action,
            attributes: planned,
            changes,
        })
    }

    /// Plans every instance concurrently, one task per instance.
    ///
    /// Results are sorted by address.
    ///
    /// # Errors
    ///
    /// Returns the first planning error encountered.
    pub async fn plan_all(self: Arc<Self>, instances: Vec<ResourceInstance>) -> Result<Vec<ResourcePlan>> {
        let mut tasks = JoinSet::new();
        for instance in instances {
            let engine = Arc::clone(&self);
            tasks.spawn(async move { engine.plan_resource(&instance) });
        }

        let mut plans = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let plan = joined.map_err(|e| PlanError::TaskFailed {
                message: e.to_string(),
            })??;
            plans.push(plan);
        }

        plans.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(plans)
    }

    /// Plans a tentative plan document against recorded state.
    ///
    /// # Errors
    ///
    /// Returns the first planning error encountered.
    pub async fn plan_documents(
        self: Arc<Self>,
        plan: &PlanDocument,
        state: Option<&StateDocument>,
    ) -> Result<ProviderPlan> {
        let instances = ResourceInstance::from_documents(plan, state);
        let provider = self.provider.clone();
        let resources = self.plan_all(instances).await?;

        let plan = ProviderPlan::new(provider, resources);
        info!(
            "Planned {} resources: {} to create, {} to update",
            plan.resources.len(),
            plan.count(PlanAction::Create),
            plan.count(PlanAction::Update)
        );
        Ok(plan)
    }
}

/// Narrows prior and tentative values to the chain's shape, runs it, and widens the result.
fn reconcile<T: AttributeShape>(
    chain: &ModifierChain<T>,
    address: &str,
    name: &str,
    prior: Option<AttributeValue<Value>>,
    tentative: AttributeValue<Value>,
) -> Result<AttributeValue<Value>> {
    let narrow = |value: AttributeValue<Value>| {
        value.into_shape::<T>().map_err(|found| {
            PlanError::shape_mismatch(address, name, T::KIND.json_kind(), json_kind(&found))
        })
    };

    let prior = prior.map(narrow).transpose()?;
    let tentative = narrow(tentative)?;

    Ok(chain.run(name, prior.as_ref(), tentative).to_untyped())
}
