use super::model_builder::ArmyModel;
use crate::domain::{
    models::{LinearExpression, ObjectiveFunction},
    value_objects::ObjectiveKind,
};

/// A named objective over the army model, always minimised
#[derive(Debug, Clone)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub expression: LinearExpression,
}

impl Objective {
    pub fn to_function(&self) -> ObjectiveFunction {
        ObjectiveFunction::minimize(&self.expression)
    }

    /// Realized value of this objective for a variable assignment
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.expression.evaluate(values)
    }
}

/// The three objectives of the army model, tagged by kind
#[derive(Debug, Clone)]
pub struct ObjectiveSet {
    objectives: Vec<Objective>,
}

impl ObjectiveSet {
    pub fn from_model(model: &ArmyModel) -> Self {
        let objectives = ObjectiveKind::ALL
            .iter()
            .map(|&kind| {
                let expression = match kind {
                    ObjectiveKind::NegAttack => {
                        let mut e = model.expressions.total_attack_strength.negated();
                        e.name = kind.id().to_string();
                        e
                    }
                    ObjectiveKind::HallOfOrderTime => {
                        model.expressions.hall_of_order_build_time.clone()
                    }
                    ObjectiveKind::BarracksTime => model.expressions.barracks_build_time.clone(),
                };
                Objective { kind, expression }
            })
            .collect();

        Self { objectives }
    }

    pub fn kinds(&self) -> Vec<ObjectiveKind> {
        self.objectives.iter().map(|o| o.kind).collect()
    }

    pub fn get(&self, kind: ObjectiveKind) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter()
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }
}
