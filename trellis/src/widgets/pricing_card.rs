//! Pricing card widget - one plan with price, features and a call to action.

use serde::{Deserialize, Serialize};
use webdom::Element;

use crate::handler_context::{call_handler, handler, EventData};
use crate::render::{render_or_default, Renderer};
use crate::types::{modifier, WidgetSize};
use crate::{HandlerRegistry, WidgetHandlers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
    OneTime,
}

impl BillingPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::OneTime => "one-time",
        }
    }

    /// Suffix shown after the price. One-time prices have none.
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Monthly => Some("/month"),
            Self::Yearly => Some("/year"),
            Self::OneTime => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanFeature {
    pub label: String,
    pub included: bool,
}

impl PlanFeature {
    pub fn included(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            included: true,
        }
    }

    pub fn excluded(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            included: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    /// `None` renders as "Custom" (contact sales).
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub period: BillingPeriod,
    pub description: Option<String>,
    pub features: Vec<PlanFeature>,
    pub badge: Option<String>,
    pub highlighted: bool,
    pub cta_label: Option<String>,
    pub disabled: bool,
}

impl PricingPlan {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = Some(symbol.into());
        self
    }

    pub fn period(mut self, period: BillingPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn features(mut self, features: Vec<PlanFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    pub fn cta_label(mut self, label: impl Into<String>) -> Self {
        self.cta_label = Some(label.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Format a price for display.
///
/// Whole amounts drop the decimals ("$29"), others keep two ("$29.99"). Zero
/// is "Free" and a missing price is "Custom".
pub fn format_price(price: Option<f64>, currency: Option<&str>) -> String {
    let Some(price) = price else {
        return "Custom".into();
    };
    if price <= 0.0 {
        return "Free".into();
    }

    let symbol = currency.unwrap_or("$");
    if price.fract() == 0.0 {
        format!("{symbol}{price:.0}")
    } else {
        format!("{symbol}{price:.2}")
    }
}

/// A pricing card widget builder.
///
/// # Example
///
/// ```ignore
/// PricingCard::new()
///     .plan(
///         PricingPlan::new("pro", "Pro")
///             .price(29.0)
///             .features(vec![PlanFeature::included("All courses")])
///             .highlighted(),
///     )
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Default)]
pub struct PricingCard {
    id: Option<String>,
    plan: PricingPlan,
    show_features: bool,
    badge_renderer: Option<Renderer<str>>,
    size: WidgetSize,
}

impl PricingCard {
    pub fn new() -> Self {
        Self {
            show_features: true,
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn plan(mut self, plan: PricingPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn show_features(mut self, show: bool) -> Self {
        self.show_features = show;
        self
    }

    /// Custom badge markup. Falls back to the text badge when it fails.
    pub fn badge_renderer(mut self, renderer: Renderer<str>) -> Self {
        self.badge_renderer = Some(renderer);
        self
    }

    pub fn size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    /// Build the pricing card element.
    ///
    /// Handlers: `on_select` with `EventData::Select { id, label }`, not
    /// registered for disabled plans.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let plan = self.plan;
        let id = self.id.unwrap_or_else(|| match plan.id.as_str() {
            "" => "pricing-card".into(),
            plan_id => format!("pricing-{plan_id}"),
        });
        let registry = registry.scope(&id);
        let cta_id = format!("{id}-cta");
        let title_id = format!("{id}-title");

        let badge = plan
            .badge
            .as_deref()
            .filter(|b| !webdom::text::is_blank(b))
            .map(|badge| {
                render_or_default(self.badge_renderer.as_ref(), badge, "badge", || {
                    Element::text(badge).class("pricing-card__badge")
                })
            });

        let header = Element::new("header")
            .class("pricing-card__header")
            .maybe_child(badge)
            .child(
                Element::new("h3")
                    .id(&title_id)
                    .class("pricing-card__name")
                    .text_content(&plan.name),
            );

        let amount = format_price(plan.price, plan.currency.as_deref());
        let has_amount = plan.price.is_some_and(|p| p > 0.0);
        let price = Element::div()
            .class("pricing-card__price")
            .child(Element::text(amount).class("pricing-card__amount"))
            .maybe_child(
                plan.period
                    .suffix()
                    .filter(|_| has_amount)
                    .map(|suffix| Element::text(suffix).class("pricing-card__period")),
            );

        let description = plan
            .description
            .as_deref()
            .filter(|d| !webdom::text::is_blank(d))
            .map(|d| {
                Element::new("p")
                    .class("pricing-card__description")
                    .text_content(d)
            });

        let features = (self.show_features && !plan.features.is_empty()).then(|| {
            Element::list().class("pricing-card__features").children(
                plan.features
                    .iter()
                    .filter(|f| !webdom::text::is_blank(&f.label))
                    .map(|feature| {
                        let state = if feature.included { "Included" } else { "Not included" };
                        Element::item()
                            .class("pricing-card__feature")
                            .class(if feature.included {
                                "pricing-card__feature--included"
                            } else {
                                "pricing-card__feature--excluded"
                            })
                            .aria("label", format!("{}: {state}", feature.label))
                            .child(
                                Element::text(if feature.included { "✓" } else { "✗" })
                                    .aria("hidden", "true"),
                            )
                            .child(Element::text(&feature.label))
                    }),
            )
        });

        let cta_label = plan
            .cta_label
            .clone()
            .filter(|l| !webdom::text::is_blank(l))
            .unwrap_or_else(|| "Choose plan".into());
        let mut cta = Element::button(cta_label)
            .id(&cta_id)
            .class("pricing-card__cta")
            .flag_if(plan.disabled, "disabled");
        if plan.disabled {
            cta = cta.aria("disabled", "true");
        } else if let Some(callback) = handlers.get("on_select").cloned() {
            let plan_id = plan.id.clone();
            let name = plan.name.clone();
            let element_id = cta_id.clone();
            registry.register(
                &cta_id,
                "on_click",
                handler(move |_| {
                    call_handler(
                        &callback,
                        &element_id,
                        EventData::Select {
                            id: plan_id.clone(),
                            label: name.clone(),
                        },
                    );
                }),
            );
        }

        Element::new("article")
            .id(&id)
            .class("pricing-card")
            .class(modifier("pricing-card", self.size.as_str()))
            .class_if(plan.highlighted, "pricing-card--highlighted")
            .class_if(plan.disabled, "pricing-card--disabled")
            .data("plan", &plan.id)
            .data("period", plan.period.as_str())
            .aria("labelledby", &title_id)
            .child(header)
            .child(price)
            .maybe_child(description)
            .maybe_child(features)
            .child(Element::div().class("pricing-card__footer").child(cta))
    }
}
