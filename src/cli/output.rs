//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::modifier::RuleKind;
use crate::planner::{ChangeKind, PlanAction, ProviderPlan};
use crate::schema::{ProviderSchema, ValidationResult};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Known after apply")]
    known_after_apply: String,
}

/// Rule row for table display.
#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Rule")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a final plan for display.
    #[must_use]
    pub fn format_plan(&self, plan: &ProviderPlan, detailed: bool) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(plan).unwrap_or_default(),
            OutputFormat::Text => Self::format_plan_text(plan, detailed),
        }
    }

    /// Formats a plan as text.
    fn format_plan_text(plan: &ProviderPlan, detailed: bool) -> String {
        let mut output = String::new();

        let id = plan.id.to_string();
        let _ = write!(
            output,
            "\nPlan {} for provider {}\n\n",
            &id[..8],
            plan.provider
        );

        if plan.resources.is_empty() {
            output.push_str("   No resources in plan.\n");
            return output;
        }

        let rows: Vec<ResourceRow> = plan
            .resources
            .iter()
            .enumerate()
            .map(|(i, r)| ResourceRow {
                index: i + 1,
                action: Self::format_action(r.action),
                resource: r.address.clone(),
                known_after_apply: Self::truncate(&r.known_after_apply().join(", "), 40),
            })
            .collect();

        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        for resource in &plan.resources {
            let changes: Vec<_> = resource
                .changes
                .iter()
                .filter(|c| detailed || c.kind != ChangeKind::Unchanged)
                .collect();
            if changes.is_empty() {
                continue;
            }

            let _ = writeln!(output, "\n  {} ({})", resource.address, resource.resource_type);
            for change in changes {
                let line = change.to_string();
                let line = match change.kind {
                    ChangeKind::Set => line.green().to_string(),
                    ChangeKind::Updated => line.yellow().to_string(),
                    ChangeKind::KnownAfterApply | ChangeKind::Unchanged => line.dimmed().to_string(),
                };
                let _ = writeln!(output, "      {line}");
            }
        }

        if plan.is_empty() {
            let _ = write!(
                output,
                "\n{} No changes required - recorded state matches the plan.\n",
                "✓".green()
            );
        } else {
            let _ = write!(
                output,
                "\nPlan: {} to create, {} to update, {} unchanged\n",
                plan.count(PlanAction::Create).to_string().green(),
                plan.count(PlanAction::Update).to_string().yellow(),
                plan.count(PlanAction::NoOp)
            );
        }

        output
    }

    /// Formats the list of available rules.
    #[must_use]
    pub fn format_rules(&self) -> String {
        match self.format {
            OutputFormat::Json => {
                let rules: Vec<_> = RuleKind::ALL
                    .iter()
                    .map(|k| serde_json::json!({ "name": k.name(), "description": k.description() }))
                    .collect();
                serde_json::to_string_pretty(&rules).unwrap_or_default()
            }
            OutputFormat::Text => {
                let rows: Vec<RuleRow> = RuleKind::ALL
                    .iter()
                    .map(|k| RuleRow {
                        name: k.name().to_string(),
                        description: k.description().to_string(),
                    })
                    .collect();
                format!("{}\n", Table::new(rows))
            }
        }
    }

    /// Formats a schema validation summary.
    #[must_use]
    pub fn format_validation(
        &self,
        schema: &ProviderSchema,
        result: &ValidationResult,
        show_warnings: bool,
    ) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "valid": result.is_valid(),
                "provider": schema.provider,
                "resources": schema.resources.len(),
                "attributes": schema.attribute_count(),
                "plan_modifiers": schema.modifier_count(),
                "warnings": result.warnings,
            }))
            .unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = if result.is_valid() {
                    format!("{} Schema is valid!\n", "✓".green())
                } else {
                    format!("{} Schema has {} errors\n", "✗".red(), result.error_count())
                };

                for error in &result.errors {
                    let _ = writeln!(output, "   - {error}");
                }

                if show_warnings && result.warning_count() > 0 {
                    let _ = write!(output, "\n{} Warnings:\n", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                let _ = write!(output, "\nSchema summary:\n");
                let _ = writeln!(output, "  Provider: {}", schema.provider);
                let _ = writeln!(output, "  Resource types: {}", schema.resources.len());
                let _ = writeln!(output, "  Attributes: {}", schema.attribute_count());
                let _ = writeln!(output, "  Plan modifiers: {}", schema.modifier_count());
                output
            }
        }
    }

    /// Formats an action with color.
    fn format_action(action: PlanAction) -> String {
        match action {
            PlanAction::Create => "+create".green().to_string(),
            PlanAction::Update => "~update".yellow().to_string(),
            PlanAction::NoOp => "no-op".dimmed().to_string(),
        }
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{head}...")
        }
    }
}
