//! Skill Taxonomy — role profiles, the implication graph, and learning-resource links.
//!
//! Built once at startup (either the built-in tables below or a JSON file named by
//! `SKILL_TAXONOMY_PATH`) and shared read-only behind an `Arc` for the life of the process.
//! Every skill lookup is case-insensitive; keys are folded with [`fold`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Built-in data
// ────────────────────────────────────────────────────────────────────────────

const ROLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "Frontend Developer",
        &[
            "React", "JavaScript", "TypeScript", "HTML", "CSS", "Tailwind", "Redux", "Vite",
            "Git", "Figma", "Next.js", "Angular JS",
        ],
    ),
    (
        "Backend Developer",
        &[
            "C", "C++", "Python", "Java", "Node.js", "Django", "Flask", "Docker", "SQL",
            "PostgreSQL", "MongoDB", "AWS", "API",
        ],
    ),
    (
        "Data Scientist",
        &[
            "Python", "SQL", "Pandas", "NumPy", "Scikit-Learn", "TensorFlow", "PyTorch",
            "Matplotlib", "Statistics", "Jupyter", "Machine Learning",
        ],
    ),
    (
        "AI Engineer",
        &[
            "Python", "PyTorch", "TensorFlow", "Deep Learning", "NLP", "Transformers",
            "Computer Vision", "GANs", "OpenCV", "LangChain", "LLM", "Bert",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "AWS", "Azure", "Docker", "Kubernetes", "Jenkins", "CI/CD", "Linux", "Terraform",
            "Git", "Bash",
        ],
    ),
    (
        "Mobile Developer",
        &[
            "Java", "Kotlin", "Swift", "Flutter", "React Native", "Firebase", "Android Studio",
            "iOS",
        ],
    ),
];

/// "If you know X, you know Y." Chains and cycles (Transformers ↔ Bert) are expected.
const IMPLIED_SKILLS: &[(&str, &[&str])] = &[
    ("React", &["JavaScript", "HTML", "CSS", "Vite"]),
    ("Next.js", &["React", "JavaScript", "HTML", "CSS"]),
    ("Django", &["Python", "SQL"]),
    ("Flask", &["Python", "SQL"]),
    (
        "Scikit-Learn",
        &["Python", "Pandas", "NumPy", "Matplotlib", "Statistics"],
    ),
    ("Machine Learning", &["Python", "Pandas", "NumPy", "Scikit-Learn"]),
    ("Deep Learning", &["Python", "TensorFlow", "PyTorch", "NumPy"]),
    ("Python", &["Pandas", "NumPy", "Matplotlib"]),
    ("PyTorch", &["Python", "Deep Learning", "NumPy"]),
    ("TensorFlow", &["Python", "Deep Learning", "NumPy"]),
    (
        "Transformers",
        &["Deep Learning", "NLP", "Python", "Bert", "LLM"],
    ),
    ("Bert", &["Transformers", "NLP", "Deep Learning"]),
    ("LLM", &["Transformers", "NLP", "Deep Learning"]),
    ("GANs", &["Deep Learning", "Computer Vision", "Python"]),
    ("Jupyter Notebook", &["Jupyter", "Python"]),
    ("Google Colab", &["Jupyter", "Python"]),
];

const RESOURCES: &[(&str, &str)] = &[
    ("React", "https://react.dev/learn"),
    ("JavaScript", "https://javascript.info/"),
    ("TypeScript", "https://www.typescriptlang.org/docs/"),
    ("HTML", "https://developer.mozilla.org/en-US/docs/Web/HTML"),
    ("CSS", "https://developer.mozilla.org/en-US/docs/Web/CSS"),
    ("Tailwind", "https://tailwindcss.com/docs"),
    ("Redux", "https://redux.js.org/introduction/getting-started"),
    ("Vite", "https://vitejs.dev/guide/"),
    ("Git", "https://www.atlassian.com/git/tutorials"),
    ("Figma", "https://www.youtube.com/watch?v=jwKhePdKHfk"),
    ("Python", "https://www.python.org/about/gettingstarted/"),
    ("Java", "https://www.codecademy.com/learn/learn-java"),
    ("Node.js", "https://nodejs.org/en/docs/"),
    ("Django", "https://www.djangoproject.com/start/"),
    ("Flask", "https://flask.palletsprojects.com/"),
    ("Docker", "https://www.docker.com/101-tutorial/"),
    ("SQL", "https://www.w3schools.com/sql/"),
    ("PostgreSQL", "https://www.postgresqltutorial.com/"),
    ("MongoDB", "https://www.mongodb.com/basics"),
    ("AWS", "https://aws.amazon.com/getting-started/"),
    ("Azure", "https://learn.microsoft.com/en-us/training/azure/"),
    ("Pandas", "https://pandas.pydata.org/docs/getting_started/index.html"),
    ("NumPy", "https://numpy.org/learn/"),
    ("Scikit-Learn", "https://scikit-learn.org/stable/tutorial/index.html"),
    ("TensorFlow", "https://www.tensorflow.org/learn"),
    ("PyTorch", "https://pytorch.org/tutorials/"),
    ("Deep Learning", "https://www.coursera.org/specializations/deep-learning"),
    ("NLP", "https://www.coursera.org/learn/nlp-sequence-models"),
    ("Transformers", "https://huggingface.co/docs/transformers/index"),
    ("Computer Vision", "https://opencv.org/"),
    ("GANs", "https://developers.google.com/machine-learning/gan"),
    ("Kubernetes", "https://kubernetes.io/docs/tutorials/kubernetes-basics/"),
    ("CI/CD", "https://www.gitlab.com/topics/ci-cd/"),
    ("Terraform", "https://developer.hashicorp.com/terraform/tutorials"),
    ("Flutter", "https://flutter.dev/learn"),
    ("React Native", "https://reactnative.dev/docs/getting-started"),
    ("Kotlin", "https://kotlinlang.org/docs/home.html"),
    ("Swift", "https://developer.apple.com/swift/resources/"),
];

/// Skills rendered fully upper-case in display form.
const ACRONYM_SKILLS: &[&str] = &["sql", "html", "css", "api", "llm", "nlp", "aws"];

const FALLBACK_LINK_PREFIX: &str = "https://www.youtube.com/results?search_query=learn+";

// ────────────────────────────────────────────────────────────────────────────
// Errors and file format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate role '{0}'")]
    DuplicateRole(String),

    #[error("role '{0}' contains an empty skill name")]
    EmptySkill(String),

    #[error("taxonomy declares no roles")]
    NoRoles,
}

/// A target role and its required skills, in declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    pub skills: Vec<String>,
}

/// On-disk shape of a taxonomy override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyFile {
    pub roles: Vec<RoleProfile>,
    #[serde(default)]
    pub implications: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
}

// ────────────────────────────────────────────────────────────────────────────
// SkillTaxonomy
// ────────────────────────────────────────────────────────────────────────────

/// Case-folds a skill or role name for comparison.
pub fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    roles: Vec<RoleProfile>,
    implications: HashMap<String, Vec<String>>,
    resources: HashMap<String, String>,
    known_skills: Vec<String>,
}

impl SkillTaxonomy {
    /// The hand-curated default taxonomy.
    pub fn builtin() -> Self {
        let roles = ROLE_SKILLS
            .iter()
            .map(|(name, skills)| RoleProfile {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        let implications = IMPLIED_SKILLS
            .iter()
            .map(|(skill, implied)| {
                (
                    skill.to_string(),
                    implied.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        let resources = RESOURCES
            .iter()
            .map(|(skill, url)| (skill.to_string(), url.to_string()))
            .collect();

        Self::assemble(TaxonomyFile {
            roles,
            implications,
            resources,
        })
    }

    /// Builds a taxonomy from parsed file contents, validating role names and skills.
    pub fn from_file(file: TaxonomyFile) -> Result<Self, TaxonomyError> {
        if file.roles.is_empty() {
            return Err(TaxonomyError::NoRoles);
        }

        let mut seen = HashSet::new();
        for role in &file.roles {
            if !seen.insert(fold(&role.name)) {
                return Err(TaxonomyError::DuplicateRole(role.name.clone()));
            }
            if role.skills.iter().any(|s| s.trim().is_empty()) {
                return Err(TaxonomyError::EmptySkill(role.name.clone()));
            }
        }

        let taxonomy = Self::assemble(file);
        taxonomy.warn_unknown_implications();
        Ok(taxonomy)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn assemble(file: TaxonomyFile) -> Self {
        let mut implications: HashMap<String, Vec<String>> = HashMap::new();
        for (skill, implied) in file.implications {
            implications.entry(fold(&skill)).or_default().extend(implied);
        }

        let resources = file
            .resources
            .into_iter()
            .map(|(skill, url)| (fold(&skill), url))
            .collect();

        let mut seen = HashSet::new();
        let known_skills = file
            .roles
            .iter()
            .flat_map(|r| r.skills.iter())
            .filter(|s| seen.insert(fold(s)))
            .cloned()
            .collect();

        Self {
            roles: file.roles,
            implications,
            resources,
            known_skills,
        }
    }

    /// Implied skills that no role requires are still propagated, but they can never
    /// be matched, so flag them for whoever curates the file.
    fn warn_unknown_implications(&self) {
        let known: HashSet<String> = self.known_skills.iter().map(|s| fold(s)).collect();
        for implied in self.implications.values().flatten() {
            if !known.contains(&fold(implied)) {
                tracing::warn!(skill = %implied, "Implied skill is not required by any role");
            }
        }
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    /// Looks up a role by exact name, then case-insensitively.
    pub fn role(&self, name: &str) -> Option<&RoleProfile> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .or_else(|| {
                let key = fold(name);
                self.roles.iter().find(|r| fold(&r.name) == key)
            })
    }

    /// Required skills for a role; an unknown role has no requirements.
    pub fn required_skills(&self, role: &str) -> &[String] {
        self.role(role).map(|r| r.skills.as_slice()).unwrap_or(&[])
    }

    /// Union of every role's required skills, first-declared casing, no duplicates.
    pub fn known_skills(&self) -> &[String] {
        &self.known_skills
    }

    pub fn implied_by(&self, skill: &str) -> &[String] {
        self.implications
            .get(&fold(skill))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Curated learning link, or a generated tutorial search.
    pub fn resource_link(&self, skill: &str) -> String {
        match self.resources.get(&fold(skill)) {
            Some(url) => url.clone(),
            None => {
                let query: Vec<&str> = skill.split_whitespace().collect();
                format!("{FALLBACK_LINK_PREFIX}{}+tutorial", query.join("+"))
            }
        }
    }

    /// Canonical display form: acronyms upper-cased, everything else title-cased.
    pub fn display_name(skill: &str) -> String {
        if ACRONYM_SKILLS.contains(&fold(skill).as_str()) {
            return skill.trim().to_uppercase();
        }
        title_case(skill.trim())
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest,
/// so "node.js" becomes "Node.Js" and "scikit-learn" becomes "Scikit-Learn".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
