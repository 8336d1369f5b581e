pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Tastenkürzel:

Datei:
  Pfad eingeben   Pfad zur PDF-Datei tippen oder einfügen
  Enter           Datei auswählen (leere Zeile: analysieren)
  Esc             Eingabe leeren

Lebenslauf:
  Ctrl + A        Lebenslauf analysieren
  Ctrl + D        Als PDF herunterladen

Ergebnis:
  ↑ / ↓           Text scrollen
  PgUp / PgDn     Seitenweise scrollen

Allgemein:
  F1 / ?          Hilfe ein-/ausblenden
  Ctrl + E        Fehlerdetails anzeigen
  Ctrl + Q        Beenden
"#
        .to_string()
    }
}
