//! Static upgrade catalog: every purchasable upgrade for every tool, the
//! per-tool baseline parameters those upgrades modify, and the data sanity
//! checks run at store construction.

/// Interaction tools, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    Button,
    Lever,
    Dial,
}

impl ToolId {
    pub const COUNT: usize = 3;

    pub fn all() -> &'static [ToolId] {
        &[ToolId::Button, ToolId::Lever, ToolId::Dial]
    }

    pub fn index(&self) -> usize {
        match self {
            ToolId::Button => 0,
            ToolId::Lever => 1,
            ToolId::Dial => 2,
        }
    }

    /// Panel / shop section label.
    pub fn label(&self) -> &'static str {
        match self {
            ToolId::Button => "BUTTON",
            ToolId::Lever => "LEVER",
            ToolId::Dial => "DIAL",
        }
    }

    /// Parameters a tool starts with before any upgrade is purchased.
    /// Roles covered by a catalog entry repeat that entry's `effect_base`
    /// so a level-0 projection lands on the same values.
    pub fn baseline(&self) -> DerivedParams {
        match self {
            ToolId::Button => DerivedParams {
                yield_per_action: 1.0,
                action_duration: 5.0,
                cooldown_duration: 3.0,
                response_speed: 1.0,
                automation: false,
            },
            ToolId::Lever => DerivedParams {
                yield_per_action: 1.0,
                action_duration: 2.0,
                cooldown_duration: 3.0,
                response_speed: 1.0,
                automation: false,
            },
            ToolId::Dial => DerivedParams {
                yield_per_action: 2.0,
                action_duration: 0.0,
                cooldown_duration: 2.0,
                response_speed: 2.0,
                automation: false,
            },
        }
    }
}

/// Which derived parameter an upgrade modifies. The projection in
/// `store::recompute_params` dispatches on this, so adding a new upgrade
/// that reuses an existing role is a pure data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeId {
    Yield,
    HoldTime,
    Cooldown,
    DragSpeed,
    AutoPress,
}

/// The live gameplay knobs for one tool, recomputed wholesale from the
/// upgrade table after every purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParams {
    /// Merits deposited per completed interaction.
    pub yield_per_action: f64,
    /// Seconds of charge/travel before the interaction completes.
    pub action_duration: f64,
    /// Seconds the tool rests after a completion.
    pub cooldown_duration: f64,
    /// Speed multiplier for travel/sweep style interactions.
    pub response_speed: f64,
    /// Whether the tool re-triggers itself.
    pub automation: bool,
}

/// One purchasable upgrade. `(tool, id)` is the unique key; every tool has
/// its own `Yield` entry, so neither field alone identifies an upgrade.
#[derive(Debug)]
pub struct UpgradeDef {
    pub tool: ToolId,
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub max_level: Option<u32>,
    pub effect_base: f64,
    pub effect_step: f64,
    /// Clamp limit: a floor when `effect_step` is negative, a cap when
    /// positive. `validate` rejects definitions where direction and step
    /// sign disagree.
    pub min_effect: Option<f64>,
    pub initially_unlocked: bool,
}

pub const CATALOG: &[UpgradeDef] = &[
    // ── button ─────────────────────────────────────────────────
    UpgradeDef {
        tool: ToolId::Button,
        id: UpgradeId::Yield,
        name: "Output Optimization",
        description: "Output Optimization Initiative — every task you complete now produces more measurable productivity units.",
        base_cost: 10.0,
        cost_multiplier: 1.6,
        max_level: None,
        effect_base: 1.0,
        effect_step: 1.0,
        min_effect: None,
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Button,
        id: UpgradeId::HoldTime,
        name: "Ergonomic Interface",
        description: "Ergonomic Interface Upgrade — your finger fatigue is of great concern to Objet Systems.",
        base_cost: 15.0,
        cost_multiplier: 1.8,
        max_level: None,
        effect_base: 5.0,
        effect_step: -0.5,
        min_effect: Some(2.0),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Button,
        id: UpgradeId::Cooldown,
        name: "Cycle Time Reduction",
        description: "Cycle Time Reduction Protocol — increase operational cadence without overheating (monitored for your safety).",
        base_cost: 20.0,
        cost_multiplier: 1.8,
        max_level: None,
        effect_base: 3.0,
        effect_step: -0.25,
        min_effect: Some(1.0),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Button,
        id: UpgradeId::AutoPress,
        name: "Auto-Press Module",
        description: "Integrated Auto-Press Module — enables perpetual contribution without human oversight.",
        base_cost: 500.0,
        cost_multiplier: 1.0, // fixed cost
        max_level: Some(1),
        effect_base: 0.0,
        effect_step: 0.0,
        min_effect: None,
        initially_unlocked: false,
    },
    // ── lever ──────────────────────────────────────────────────
    UpgradeDef {
        tool: ToolId::Lever,
        id: UpgradeId::Yield,
        name: "Lever Output Optimization",
        description: "Greater yield per motion—because the company values every ounce of you.",
        base_cost: 10.0,
        cost_multiplier: 1.5,
        max_level: Some(5),
        effect_base: 1.0,
        effect_step: 1.0,
        min_effect: None,
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Lever,
        id: UpgradeId::DragSpeed,
        name: "Lever Ergonomic Adjustment",
        description: "Streamlined design to prevent worker fatigue—and maintain pace.",
        base_cost: 15.0,
        cost_multiplier: 1.6,
        max_level: Some(4),
        effect_base: 1.0,
        effect_step: 1.0,
        min_effect: Some(5.0),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Lever,
        id: UpgradeId::Cooldown,
        name: "Lever Reset Optimization",
        description: "Why wait, when every moment of delay is a loss for the greater good?",
        base_cost: 20.0,
        cost_multiplier: 1.6,
        max_level: Some(4),
        effect_base: 3.0,
        effect_step: -0.25,
        min_effect: Some(1.0),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Lever,
        id: UpgradeId::AutoPress,
        name: "Auto-Pull Mechanism",
        description: "Unyielding, mechanical, and tireless—an operator as perfect as the company envisioned.",
        base_cost: 250.0,
        cost_multiplier: 1.0,
        max_level: Some(1),
        effect_base: 0.0,
        effect_step: 0.0,
        min_effect: None,
        initially_unlocked: false,
    },
    // ── dial ───────────────────────────────────────────────────
    UpgradeDef {
        tool: ToolId::Dial,
        id: UpgradeId::Yield,
        name: "Dial Calibration Bonus",
        description: "Each successful alignment now counts toward more of the metrics that matter — to us.",
        base_cost: 30.0,
        cost_multiplier: 1.6,
        max_level: Some(6),
        effect_base: 2.0,
        effect_step: 2.0,
        min_effect: None,
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Dial,
        id: UpgradeId::DragSpeed,
        name: "Servo Response Tuning",
        description: "The pointer sweeps faster. Your reflexes were never the bottleneck; our hardware was.",
        base_cost: 25.0,
        cost_multiplier: 1.7,
        max_level: Some(4),
        effect_base: 2.0,
        effect_step: 1.0,
        min_effect: Some(6.0),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Dial,
        id: UpgradeId::Cooldown,
        name: "Spin-Up Reduction",
        description: "Reduced settling time between alignments. Idle dials depreciate.",
        base_cost: 40.0,
        cost_multiplier: 1.7,
        max_level: Some(6),
        effect_base: 2.0,
        effect_step: -0.25,
        min_effect: Some(0.5),
        initially_unlocked: true,
    },
    UpgradeDef {
        tool: ToolId::Dial,
        id: UpgradeId::AutoPress,
        name: "Auto-Align Servo",
        description: "Self-aligning instrumentation — precision without the burden of attention.",
        base_cost: 750.0,
        cost_multiplier: 1.0,
        max_level: Some(1),
        effect_base: 0.0,
        effect_step: 0.0,
        min_effect: None,
        initially_unlocked: false,
    },
];

/// All definitions for one tool, in catalog (= display) order.
pub fn defs_for_tool(tool: ToolId) -> impl Iterator<Item = &'static UpgradeDef> {
    CATALOG.iter().filter(move |d| d.tool == tool)
}

/// Look up a definition by its `(tool, id)` key.
pub fn find(tool: ToolId, id: UpgradeId) -> Option<&'static UpgradeDef> {
    CATALOG.iter().find(|d| d.tool == tool && d.id == id)
}

/// Data sanity checks. `Store::new` debug-asserts this; tests call it
/// directly so a mis-tuned entry fails loudly instead of silently freezing
/// a progression curve.
pub fn validate() -> Result<(), String> {
    let mut seen: Vec<(ToolId, UpgradeId)> = Vec::new();
    for def in CATALOG {
        let key = (def.tool, def.id);
        if seen.contains(&key) {
            return Err(format!("duplicate catalog entry {:?}", key));
        }
        seen.push(key);

        if !(def.base_cost > 0.0) {
            return Err(format!("{}: base_cost must be positive", def.name));
        }
        if def.cost_multiplier < 1.0 {
            return Err(format!("{}: cost_multiplier below 1 shrinks prices", def.name));
        }
        if def.max_level == Some(0) {
            return Err(format!("{}: max_level 0 can never be purchased", def.name));
        }
        if let Some(limit) = def.min_effect {
            if def.effect_step < 0.0 && limit >= def.effect_base {
                return Err(format!(
                    "{}: floor {} does not sit below base {}",
                    def.name, limit, def.effect_base
                ));
            }
            if def.effect_step > 0.0 && limit <= def.effect_base {
                return Err(format!(
                    "{}: cap {} does not sit above base {}",
                    def.name, limit, def.effect_base
                ));
            }
            if def.effect_step == 0.0 {
                return Err(format!("{}: clamp with zero step does nothing", def.name));
            }
        }
    }
    Ok(())
}
