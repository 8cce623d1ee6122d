use quickshift_horarios::config::reglas::{reglas_grupos, reglas_topones};
use quickshift_horarios::config::{ConfigStore, ConfiguracionHorarios};
use quickshift_horarios::models::TipoTopon;
use tempfile::tempdir;

const CONFIG_JSON: &str = r#"
{
    "groupConfigs": {
        "CES1159_1": {"course": "CES1159", "section": 1, "groups": [0, 1]}
    },
    "toponesConfigs": {
        "1_1_Lunes_08:30_10:20": {
            "id": "1_1_Lunes_08:30_10:20",
            "section": 1, "dia": "Lunes", "hora_ini": "08:30", "hora_fin": "10:20",
            "tapon_type": "completo", "campus": "CAMPUS ALEMANIA"
        },
        "5_1_Martes_14:30_16:20": {
            "section": "5", "dia": "Martes", "hora_ini": "14:30", "hora_fin": "16:20",
            "tapon_type": "parcial"
        }
    }
}
"#;

#[test]
fn test_load_sin_archivo_devuelve_config_vacia() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("no_existe.json"));
    assert_eq!(store.load(), ConfiguracionHorarios::default());
}

#[test]
fn test_load_archivo_invalido_devuelve_config_vacia() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ esto no es json").unwrap();
    let store = ConfigStore::new(&path);
    assert_eq!(store.load(), ConfiguracionHorarios::default());
}

#[test]
fn test_save_y_load_conservan_reglas_y_campos_extra() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("sub").join("config.json"));
    let cfg: ConfiguracionHorarios = serde_json::from_str(CONFIG_JSON).unwrap();

    store.save(&cfg).unwrap();
    let leida = store.load();
    assert_eq!(leida, cfg);

    let grupos = reglas_grupos(&leida.group_configs);
    assert_eq!(grupos.len(), 1);
    assert_eq!(grupos[0].grupos, vec![0, 1]);

    let topones = reglas_topones(&leida.topones_configs);
    assert_eq!(topones.len(), 2);
    assert_eq!(topones[0].tipo, TipoTopon::Completo);
    assert_eq!(topones[1].seccion, 5);
    assert_eq!(topones[1].tipo, TipoTopon::Parcial);

    let texto = std::fs::read_to_string(store.path()).unwrap();
    assert!(texto.contains("\"campus\": \"CAMPUS ALEMANIA\""));
}

#[test]
fn test_load_conserva_entradas_validas_junto_a_una_mala() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "groupConfigs": {
                "MAL": {"course": "CES1159", "section": 2, "groups": null},
                "CES1159_1": {"course": "CES1159", "section": 1, "groups": [0, 1]}
            },
            "toponesConfigs": {
                "MAL": {"section": 1, "dia": ["Lunes"], "hora_ini": "08:30", "hora_fin": "10:20"}
            }
        }"#,
    )
    .unwrap();

    let cfg = ConfigStore::new(&path).load();
    assert_eq!(cfg.group_configs.len(), 1);
    assert_eq!(reglas_grupos(&cfg.group_configs)[0].seccion, 1);
    assert!(cfg.topones_configs.is_empty());
}
