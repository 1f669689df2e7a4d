//! Declarative scoring rubric: four fixed pillars, each a sequence of typed
//! questions with point values. The rubric is data, not code — the scoring
//! engine never branches on a specific question id.

use serde::Serialize;

/// Question id the emissions estimator writes its transport sub-score into.
pub const TRANSPORT_SCORE_QUESTION: &str = "p4_co2_score";

/// Fixed award for a dynamic-lookup question answered with any non-empty
/// supplier reference. Existence of the referenced entity is presumed, not
/// verified.
pub const DYNAMIC_LOOKUP_POINTS: u32 = 5;

/// One selectable option of a `select` question, or the single implicit
/// option of a `checkbox` question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
    pub points: u32,
}

/// Discriminates how an answer is converted into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Single yes/no toggle; the checked token awards the option's points.
    Checkbox,
    /// Mutually exclusive options matched by exact value equality.
    Select,
    /// Reference to an external supplier entity; scored by presence.
    DynamicLookup,
    /// The answer IS a pre-computed integer point value.
    ReadonlyScore,
}

/// One question of a pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<SelectOption>,
    /// External entity type a dynamic lookup references (e.g. "Mill").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_entity: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

impl QuestionConfig {
    /// Largest number of points this question can contribute.
    pub fn max_points(&self) -> u32 {
        match self.kind {
            QuestionKind::Checkbox | QuestionKind::Select => self
                .options
                .iter()
                .map(|option| option.points)
                .max()
                .unwrap_or(0),
            QuestionKind::DynamicLookup => DYNAMIC_LOOKUP_POINTS,
            // Bounded by what the estimator can inject.
            QuestionKind::ReadonlyScore => 5,
        }
    }
}

/// One of the four fixed scoring pillars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarConfig {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub scoring_guide: &'static str,
    pub max_score: u32,
    pub questions: Vec<QuestionConfig>,
}

impl PillarConfig {
    /// Sum of the questions' maximum contributions, before the cap.
    pub fn obtainable_points(&self) -> u32 {
        self.questions.iter().map(QuestionConfig::max_points).sum()
    }
}

/// Immutable rubric: the four pillars in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassportRubric {
    pillars: Vec<PillarConfig>,
}

impl PassportRubric {
    /// The rubric with the default (wool) certification questions.
    pub fn standard() -> Self {
        Self::for_material("Wool")
    }

    /// The rubric with pillar 1's certification questions swapped for the
    /// given material. Unrecognised materials fall back to the wool pair.
    pub fn for_material(material: &str) -> Self {
        Self {
            pillars: vec![
                fibre_pillar(material),
                traceability_pillar(),
                labour_pillar(),
                climate_pillar(),
            ],
        }
    }

    /// Assemble a rubric from explicit pillars. Used by tests that need a
    /// deliberately overfilled pillar.
    pub(crate) fn from_pillars(pillars: Vec<PillarConfig>) -> Self {
        Self { pillars }
    }

    pub fn pillars(&self) -> &[PillarConfig] {
        &self.pillars
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionConfig> {
        self.pillars
            .iter()
            .flat_map(|pillar| pillar.questions.iter())
            .find(|question| question.id == question_id)
    }

    /// Sum of the pillar caps; 100 for the fixed four-pillar rubric.
    pub fn max_total(&self) -> u32 {
        self.pillars.iter().map(|pillar| pillar.max_score).sum()
    }
}

fn checkbox(id: &'static str, label: &'static str, points: u32) -> QuestionConfig {
    QuestionConfig {
        id,
        label,
        kind: QuestionKind::Checkbox,
        options: vec![SelectOption {
            label: "Yes",
            value: "yes",
            points,
        }],
        lookup_entity: None,
        help_text: None,
    }
}

fn select(id: &'static str, label: &'static str, options: Vec<SelectOption>) -> QuestionConfig {
    QuestionConfig {
        id,
        label,
        kind: QuestionKind::Select,
        options,
        lookup_entity: None,
        help_text: None,
    }
}

fn dynamic_lookup(id: &'static str, label: &'static str, entity: &'static str) -> QuestionConfig {
    QuestionConfig {
        id,
        label,
        kind: QuestionKind::DynamicLookup,
        options: Vec::new(),
        lookup_entity: Some(entity),
        help_text: None,
    }
}

/// Material-specific certification questions for pillar 1, keyed by the
/// canonical material label (case-sensitive).
fn certification_questions(material: &str) -> [QuestionConfig; 2] {
    let (first, second) = match material {
        "Silk" => (
            ("p1_gots_silk", "GOTS Certified (Organic Silk)?"),
            ("p1_oeko_silk", "OEKO-TEX Certified?"),
        ),
        "Cotton" => (
            ("p1_gots_cotton", "GOTS Certified?"),
            ("p1_bci", "Better Cotton Initiative (BCI)?"),
        ),
        "Linen" => (
            ("p1_european_flax", "European Flax Certified?"),
            ("p1_oeko_linen", "OEKO-TEX Certified?"),
        ),
        "Cashmere" => (
            ("p1_sfa", "Sustainable Fibre Alliance (SFA)?"),
            ("p1_oeko_cashmere", "OEKO-TEX Certified?"),
        ),
        "Mohair" => (
            ("p1_rms", "Responsible Mohair Standard (RMS)?"),
            ("p1_oeko_mohair", "OEKO-TEX Certified?"),
        ),
        "Vicuna" => (
            ("p1_vicuna_permit", "CITES Permit/Sustainable Sourcing?"),
            ("p1_oeko_vicuna", "OEKO-TEX Certified?"),
        ),
        _ => (
            ("p1_woolmark", "Woolmark Certified?"),
            ("p1_rws", "Responsible Wool Standard (RWS)?"),
        ),
    };

    [
        checkbox(first.0, first.1, 5),
        checkbox(second.0, second.1, 5),
    ]
}

fn fibre_pillar(material: &str) -> PillarConfig {
    let [cert_a, cert_b] = certification_questions(material);
    PillarConfig {
        id: "pillar_1",
        title: "Pillar 1: Fibre & Material Health",
        description: "Assesses the sustainability and safety of the raw materials, including certifications and chemical management.",
        scoring_guide: "0-8 points: Minimal certifications, unknown chemical management | 9-17 points: Some certifications, partial chemical compliance | 18-25 points: Full certifications, OEKO-TEX compliant, natural trims",
        max_score: 25,
        questions: vec![
            cert_a,
            cert_b,
            select(
                "p1_chemistry",
                "Chemistry Management (Mill/Dye House)",
                vec![
                    SelectOption { label: "Yes (Compliant OEKO-TEX/ZDHC)", value: "yes", points: 5 },
                    SelectOption { label: "Partial", value: "partial", points: 2 },
                    SelectOption { label: "Unknown", value: "no", points: 0 },
                ],
            ),
            checkbox("p1_rsl", "Restricted Substances Evidence", 5),
            select(
                "p1_trims",
                "Lining & Trims",
                vec![
                    SelectOption { label: "Natural/Preferred Materials (Cupro/Metal/Horn/Silk)", value: "yes", points: 5 },
                    SelectOption { label: "Mixed", value: "partial", points: 2 },
                    SelectOption { label: "Synthetic/Plastic", value: "no", points: 0 },
                ],
            ),
        ],
    }
}

fn traceability_pillar() -> PillarConfig {
    PillarConfig {
        id: "pillar_2",
        title: "Pillar 2: Traceability",
        description: "Tracks the journey of the garment through the supply chain, ensuring visibility of all tier 1 and tier 2 suppliers.",
        scoring_guide: "0-8 points: Limited supply chain visibility | 9-17 points: Tier 1 & 2 suppliers identified, partial documentation | 18-25 points: Full traceability to raw material source, batch tracking, transparency agreements",
        max_score: 25,
        questions: vec![
            dynamic_lookup("p2_tier1", "Tier 1: Tailoring Facility", "Atelier"),
            dynamic_lookup("p2_tier2", "Tier 2: Fabric Mill", "Mill"),
            checkbox("p2_tier3", "Tier 3: Raw Material Source Known?", 5),
            checkbox("p2_batch", "Batch/Roll Tracking Available?", 5),
            checkbox("p2_transparency", "Supplier Transparency Agreement Signed?", 5),
        ],
    }
}

fn labour_pillar() -> PillarConfig {
    PillarConfig {
        id: "pillar_3",
        title: "Pillar 3: Social Responsibility & Labour",
        description: "Evaluates the ethical standards and working conditions at production facilities, including modern slavery risks.",
        scoring_guide: "0-8 points: No audits, high-risk countries, no due diligence | 9-17 points: Some audits, medium risk with partial mitigation | 18-25 points: Valid social audits, low-risk countries, full modern slavery due diligence, grievance processes",
        max_score: 25,
        questions: vec![
            select(
                "p3_audit",
                "Social Audit (SMETA/BSCI/SA8000)",
                vec![
                    SelectOption { label: "Valid Audit (<2 years)", value: "valid", points: 5 },
                    SelectOption { label: "Partial/Expired", value: "partial", points: 2 },
                    SelectOption { label: "No", value: "no", points: 0 },
                ],
            ),
            select(
                "p3_risk",
                "Country Risk Level (Modern Slavery)",
                vec![
                    SelectOption { label: "Low Risk", value: "low", points: 5 },
                    SelectOption { label: "Medium Risk (Mitigated)", value: "med_mitigated", points: 5 },
                    SelectOption { label: "Medium Risk (No Mitigation)", value: "med", points: 2 },
                    SelectOption { label: "High Risk", value: "high", points: 0 },
                ],
            ),
            checkbox("p3_modern_slavery", "Modern Slavery Due Diligence Logged?", 5),
            select(
                "p3_remedy",
                "Grievance/Remediation Process?",
                vec![
                    SelectOption { label: "Yes", value: "yes", points: 5 },
                    SelectOption { label: "No", value: "no", points: 0 },
                ],
            ),
            checkbox("p3_wages", "Living Wage Benchmarking Documented?", 5),
        ],
    }
}

fn climate_pillar() -> PillarConfig {
    PillarConfig {
        id: "pillar_4",
        title: "Pillar 4: Climate & Circularity",
        description: "Measures the environmental impact, including carbon footprint of transport and product longevity/circularity.",
        scoring_guide: "0-8 points: High transport emissions, no circular design | 9-17 points: Moderate emissions, some longevity features | 18-25 points: Low transport emissions, full canvas construction, repair/take-back programs, end-of-life guidance",
        max_score: 25,
        questions: vec![
            QuestionConfig {
                id: "p4_fibre_impact",
                label: "Fibre Impact Class",
                kind: QuestionKind::Select,
                options: vec![
                    SelectOption { label: "Class A/B (Best)", value: "A", points: 5 },
                    SelectOption { label: "Class C", value: "C", points: 2 },
                    SelectOption { label: "Class D/E", value: "E", points: 0 },
                ],
                lookup_entity: None,
                help_text: Some(
                    "Based on Higg Materials Sustainability Index (MSI). Class A/B: Natural fibres with low impact (wool, linen, organic cotton). Class C: Conventional natural fibres. Class D/E: Synthetic/high-impact materials.",
                ),
            },
            QuestionConfig {
                id: TRANSPORT_SCORE_QUESTION,
                label: "Transport Emissions (GHG Protocol Methodology)",
                kind: QuestionKind::ReadonlyScore,
                options: Vec::new(),
                lookup_entity: None,
                help_text: None,
            },
            checkbox("p4_longevity", "Longevity Design (Full Canvas/Spare Cloth)", 5),
            select(
                "p4_circular",
                "Circular Offers (Repair/Take-back)",
                vec![
                    SelectOption { label: "Yes", value: "yes", points: 5 },
                    SelectOption { label: "No", value: "no", points: 0 },
                ],
            ),
            checkbox("p4_eol", "End of Life Guidance Included?", 5),
        ],
    }
}
