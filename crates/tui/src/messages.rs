//! User-facing texts. The client is German-only, like the backend.

pub const INVALID_FILE: &str = "Bitte wählen Sie eine gültige PDF-Datei aus";
pub const NO_FILE_SELECTED: &str = "Bitte wählen Sie eine PDF-Datei aus";
pub const BACKEND_NOT_CONNECTED: &str =
    "Backend-Server ist nicht verbunden. Bitte versuchen Sie es erneut.";
pub const FILE_READ_FAILED: &str = "Die Datei konnte nicht gelesen werden";
pub const SELECTION_WHILE_BUSY: &str =
    "Bitte warten Sie, bis die laufende Anfrage abgeschlossen ist";

pub const ANALYZING: &str = "Lade Lebenslauf hoch und analysiere...";
pub const ANALYSIS_SUCCEEDED: &str = "Lebenslauf erfolgreich analysiert!";
pub const ANALYSIS_FAILED: &str = "Fehler bei der Analyse des Lebenslaufs";

pub const CREATING_PDF: &str = "Erstelle PDF...";
pub const PDF_SAVED: &str = "PDF erfolgreich erstellt und heruntergeladen!";
pub const PDF_FAILED: &str = "Fehler beim Erstellen der PDF";

/// Sent as `filename` when the analyzed text has no known source file.
pub const DEFAULT_REQUEST_FILENAME: &str = "lebenslauf";

pub fn file_selected(name: &str, size_kb: &str) -> String {
    format!("Datei ausgewählt: {name} ({size_kb})")
}
