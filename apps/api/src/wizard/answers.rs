use serde::{Deserialize, Serialize};

/// Everything the wizard collects, kept as raw strings until transformation.
/// A `None` field has not been answered yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardAnswers {
    // Step one
    pub experience: Option<String>,
    pub certifications: Option<String>,
    pub cgpa: Option<String>,
    #[serde(rename = "non_IT_student_or_not")]
    pub non_it_student: Option<String>,
    // Step two
    pub leetcode: Option<String>,
    pub full_stack_projects: Option<String>,
    pub communication: Option<String>,
    // Step three
    pub project_1: Option<String>,
    pub project_2: Option<String>,
    pub project_3: Option<String>,
}

impl WizardAnswers {
    /// Overwrites only the fields `patch` carries; everything else is kept.
    pub fn merge(&mut self, patch: WizardAnswers) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.experience, patch.experience);
        take(&mut self.certifications, patch.certifications);
        take(&mut self.cgpa, patch.cgpa);
        take(&mut self.non_it_student, patch.non_it_student);
        take(&mut self.leetcode, patch.leetcode);
        take(&mut self.full_stack_projects, patch.full_stack_projects);
        take(&mut self.communication, patch.communication);
        take(&mut self.project_1, patch.project_1);
        take(&mut self.project_2, patch.project_2);
        take(&mut self.project_3, patch.project_3);
    }
}

/// Basic info: experience, certifications, CGPA, non-IT background.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepOneInput {
    pub experience: Option<String>,
    pub certifications: Option<String>,
    pub cgpa: Option<String>,
    #[serde(rename = "non_IT_student_or_not")]
    pub non_it_student: Option<String>,
}

/// Technical details: coding practice and communication.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepTwoInput {
    pub leetcode: Option<String>,
    pub full_stack_projects: Option<String>,
    pub communication: Option<String>,
}

/// Free-text descriptions of three projects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepThreeInput {
    pub project_1: Option<String>,
    pub project_2: Option<String>,
    pub project_3: Option<String>,
}

impl From<StepOneInput> for WizardAnswers {
    fn from(input: StepOneInput) -> Self {
        WizardAnswers {
            experience: input.experience,
            certifications: input.certifications,
            cgpa: input.cgpa,
            non_it_student: input.non_it_student,
            ..Default::default()
        }
    }
}

impl From<StepTwoInput> for WizardAnswers {
    fn from(input: StepTwoInput) -> Self {
        WizardAnswers {
            leetcode: input.leetcode,
            full_stack_projects: input.full_stack_projects,
            communication: input.communication,
            ..Default::default()
        }
    }
}
