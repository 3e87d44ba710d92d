//! Interface labels per language

use spectra_settings::Language;

/// User-facing strings that change with the language toggle
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub start: &'static str,
    pub stop: &'static str,
    pub frequency: &'static str,
    pub note: &'static str,
    pub max: &'static str,
    pub samples: &'static str,
    pub level: &'static str,
    pub history: &'static str,
    pub spectrum: &'static str,
    pub field: &'static str,
    pub ring: &'static str,
    pub frozen: &'static str,
    pub paused: &'static str,
    pub stopped: &'static str,
    pub teacher_mode: &'static str,
    pub student_mode: &'static str,
}

const ES: Labels = Labels {
    title: "Medidor de frecuencia (2D + 3D)",
    subtitle: "Selector de micrófono, rango ajustable, nota musical, 3D local, historial y exportación.",
    start: "s: Iniciar medición",
    stop: "x: Detener",
    frequency: "Frecuencia",
    note: "Nota",
    max: "Máxima",
    samples: "Muestras",
    level: "Nivel",
    history: "Historial",
    spectrum: "Espectro",
    field: "Campo 3D",
    ring: "Anillo 3D",
    frozen: "congelado",
    paused: "en pausa",
    stopped: "detenido",
    teacher_mode: "Modo docente",
    student_mode: "Modo estudiante",
};

const EN: Labels = Labels {
    title: "Frequency meter (2D + 3D)",
    subtitle: "Mic selector, adjustable range, musical note, local 3D, history & export.",
    start: "s: Start measuring",
    stop: "x: Stop",
    frequency: "Frequency",
    note: "Note",
    max: "Max",
    samples: "Samples",
    level: "Level",
    history: "History",
    spectrum: "Spectrum",
    field: "3D field",
    ring: "3D ring",
    frozen: "frozen",
    paused: "paused",
    stopped: "stopped",
    teacher_mode: "Teacher mode",
    student_mode: "Student mode",
};

/// Labels for a language
pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Es => &ES,
        Language::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_switch() {
        assert!(labels(Language::Es).title.starts_with("Medidor"));
        assert!(labels(Language::En).title.starts_with("Frequency"));
        assert_ne!(labels(Language::Es).start, labels(Language::En).start);
    }
}
