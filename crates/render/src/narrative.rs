use std::path::Path;

use equilibria_common::TeamNumber;
use equilibria_kernel::Phase;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the team number in every narrative string.
pub const TEAM_PLACEHOLDER: &str = "{team}";

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Text for one screen: heading, body and the label of its main button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub title: String,
    pub text: String,
    pub button: String,
}

impl Screen {
    fn new(title: &str, text: &str, button: &str) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            button: button.into(),
        }
    }
}

/// Display data injected into the renderer. The mission never reads it.
///
/// Every string may contain `{team}`; see [`Narrative::fill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Narrative {
    pub team_label: String,
    pub intro: Screen,
    pub seesaw: Screen,
    pub seesaw_debrief: Screen,
    pub free_body: Screen,
    pub free_body_debrief: Screen,
    pub quiz: Screen,
    pub quiz_debrief: Screen,
    pub bridge: Screen,
    pub success: Screen,
    pub failure: Screen,
    /// Shown after an unbalanced check.
    pub balance_hint: String,
    /// Shown after an out-of-tolerance bridge submission.
    pub structural_alert: String,
    /// Shown on the Phase 1 debrief once the beam balances.
    pub seesaw_success: String,
    /// Shown on the Phase 2 debrief once the diagram is complete.
    pub free_body_success: String,
    /// Shown on the Phase 3 debrief once every puzzle is solved.
    pub quiz_success: String,
    pub drop_correct: String,
    pub drop_incorrect: String,
    pub answer_correct: String,
    pub answer_incorrect: String,
}

impl Default for Narrative {
    fn default() -> Self {
        Self {
            team_label: "Equipo de Ingeniería N° {team}".into(),
            intro: Screen::new(
                "Misión: Puente Estelar INA-73",
                "Año 2147. La humanidad ha colonizado el planeta Kepler-186f. Pero sus \
                 cañones geológicos son un peligro constante. Eres parte del Equipo de \
                 Ingeniería N° {team}, con la misión de diseñar un puente inquebrantable \
                 para la supervivencia de los colonos. Tu entrenamiento comienza ahora.",
                "Iniciar Fase I",
            ),
            seesaw: Screen::new(
                "Fase I: El Balancín Espacial",
                "Coloca las monedas (discos) en la regla para lograr el equilibrio. El \
                 fulcro está en la marca de 15 cm.",
                "Verificar Equilibrio",
            ),
            seesaw_debrief: Screen::new(
                "Fase I Completada: El Balancín Espacial",
                "Has dominado el principio básico del equilibrio: el torque. El torque es \
                 una 'fuerza de giro' que depende de la fuerza aplicada y la distancia al \
                 punto de giro (fulcro). Para lograr el equilibrio, la suma de todos los \
                 torques debe ser cero (Στ = 0).",
                "Iniciar Fase II",
            ),
            free_body: Screen::new(
                "Fase II: Lenguaje de Ingenieros",
                "Arrastra y suelta las flechas de fuerza para construir el Diagrama de \
                 Cuerpo Libre (DCL) del balancín.",
                "Continuar",
            ),
            free_body_debrief: Screen::new(
                "Fase II Completada: Lenguaje de Ingenieros",
                "Excelente. Has construido un Diagrama de Cuerpo Libre (DCL). Este diagrama \
                 es crucial para visualizar todas las fuerzas que actúan sobre un objeto. \
                 Las flechas hacia abajo representan pesos (fuerzas), y la flecha hacia \
                 arriba es la 'fuerza normal' o de reacción del soporte.",
                "Iniciar Fase III",
            ),
            quiz: Screen::new(
                "Fase III: Principios Inquebrantables",
                "Responde los acertijos para desbloquear el manual secreto de ingeniería \
                 espacial.",
                "Enviar Cálculo",
            ),
            quiz_debrief: Screen::new(
                "Fase III Completada: Principios Inquebrantables",
                "Tu conocimiento de los principios fundamentales es sólido. Has demostrado \
                 que entiendes las dos condiciones del equilibrio estático: la suma de \
                 todas las fuerzas es cero (ΣF = 0) y la suma de todos los torques es cero \
                 (Στ = 0). Estás listo para el desafío final.",
                "Iniciar Fase IV",
            ),
            bridge: Screen::new(
                "Fase IV: El Puente Estelar INA-73",
                "Calcula las fuerzas de reacción en los pilares A y B para estabilizar el \
                 puente.",
                "Estabilizar Puente",
            ),
            success: Screen::new(
                "¡MISIÓN CUMPLIDA!",
                "El puente es inquebrantable. Tu dominio de la estática y el torque ha \
                 salvado a la colonia. La humanidad te lo agradece, Ingeniero/a.",
                "Iniciar Nueva Misión",
            ),
            failure: Screen::new(
                "FALLO CATASTRÓFICO",
                "El puente ha colapsado bajo la tensión. Los principios de la estática no \
                 fueron aplicados correctamente. La colonia está en peligro. Debes \
                 reintentar tu diseño.",
                "Reintentar Diseño",
            ),
            balance_hint: "El balancín no está equilibrado. Recuerda: τ = Fuerza × distancia. \
                           Para equilibrar, los torques horarios deben igualar a los torques \
                           antihorarios. ¡Necesitas al menos dos monedas!"
                .into(),
            structural_alert: "Los cálculos de reacción son incorrectos y el puente es \
                               inestable. Pista: para encontrar FB, calcula la suma de los \
                               torques con respecto al pilar A (ΣτA = 0)."
                .into(),
            seesaw_success: "¡Equilibrio Logrado! Has aplicado exitosamente el principio \
                             del torque. La suma de los torques en ambos lados es cero, \
                             creando un sistema estable."
                .into(),
            free_body_success: "¡Diagrama Correcto! Has construido un Diagrama de Cuerpo \
                                Libre (DCL) perfecto. Esto es fundamental para analizar las \
                                fuerzas en cualquier sistema de ingeniería."
                .into(),
            quiz_success: "¡Manual Desbloqueado! Has demostrado maestría en los principios \
                           abstractos. Preparado para la aplicación final."
                .into(),
            drop_correct: "Correcto".into(),
            drop_incorrect: "Incorrecto".into(),
            answer_correct: "¡Respuesta Correcta! Desbloqueando fragmento del manual...".into(),
            answer_incorrect: "Cálculo incorrecto. Revisa el principio de torques: \
                               τ_izquierda = τ_derecha."
                .into(),
        }
    }
}

impl Narrative {
    /// Parse YAML. Missing screens keep their default text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NarrativeError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, NarrativeError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let narrative = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded narrative");
        Ok(narrative)
    }

    /// The screen shown while `phase` is active.
    pub fn screen(&self, phase: Phase) -> &Screen {
        match phase {
            Phase::Intro => &self.intro,
            Phase::Phase1 => &self.seesaw,
            Phase::Phase1End => &self.seesaw_debrief,
            Phase::Phase2 => &self.free_body,
            Phase::Phase2End => &self.free_body_debrief,
            Phase::Phase3 => &self.quiz,
            Phase::Phase3End => &self.quiz_debrief,
            Phase::Phase4 => &self.bridge,
            Phase::EndSuccess => &self.success,
            Phase::EndFailure => &self.failure,
        }
    }

    /// Substitute the team number into `text`.
    pub fn fill(text: &str, team: TeamNumber) -> String {
        text.replace(TEAM_PLACEHOLDER, &team.to_string())
    }
}
