use plantilla::{render, Context, Engine};
use serde_json::json;

// ── End-to-end cases modeled on real notification templates ──

const TICKET_TEMPLATE: &str = "\
[SI {{ticket.estado}} ES IGUAL QUE 'ABIERTO'] \
Hola {{usuario.nombre}}, el ticket {{ticket.numero}} sigue abierto. \
[FIN]\
[SINO PERO {{ticket.estado}} ES IGUAL QUE 'EN_PROCESO'] \
Hola {{usuario.nombre}}, el ticket {{ticket.numero}} lo atiende {{ticket.tecnico}}. \
[FIN]\
[SINO PERO {{ticket.estado}} ES IGUAL QUE 'CERRADO'] \
Hola {{usuario.nombre}}, el ticket {{ticket.numero}} quedó resuelto. \
[FIN]\
[SINO] \
Hola {{usuario.nombre}}, consulte el estado del ticket {{ticket.numero}}. \
[FIN]";

fn ticket_context(estado: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("usuario", json!({ "nombre": "Marta", "rol": "EMPLEADO" }));
    ctx.insert(
        "ticket",
        json!({
            "numero": 4812,
            "estado": estado,
            "tecnico": "Luis",
        }),
    );
    ctx
}

#[test]
fn open_ticket_uses_the_primary_branch() {
    let out = render(TICKET_TEMPLATE, &ticket_context("ABIERTO")).unwrap();
    assert_eq!(out, "Hola Marta, el ticket 4812 sigue abierto.");
}

#[test]
fn in_progress_ticket_uses_the_matching_else_if() {
    let out = render(TICKET_TEMPLATE, &ticket_context("EN_PROCESO")).unwrap();
    assert_eq!(out, "Hola Marta, el ticket 4812 lo atiende Luis.");
}

#[test]
fn closed_ticket_skips_earlier_else_ifs() {
    let out = render(TICKET_TEMPLATE, &ticket_context("CERRADO")).unwrap();
    assert_eq!(out, "Hola Marta, el ticket 4812 quedó resuelto.");
}

#[test]
fn unknown_state_falls_back_to_the_else_branch() {
    let out = render(TICKET_TEMPLATE, &ticket_context("ARCHIVADO")).unwrap();
    assert_eq!(out, "Hola Marta, consulte el estado del ticket 4812.");
}

#[test]
fn combined_condition_requires_both_sides() {
    let template = "\
[SI {{usuario.rol}} ES IGUAL QUE 'EMPLEADO' Y {{ticket.estado}} ES IGUAL QUE 'ABIERTO'] \
Tiene un ticket abierto asignado. \
[FIN]\
[SINO] \
Nada pendiente. \
[FIN]";

    let out = render(template, &ticket_context("ABIERTO")).unwrap();
    assert_eq!(out, "Tiene un ticket abierto asignado.");

    let out = render(template, &ticket_context("CERRADO")).unwrap();
    assert_eq!(out, "Nada pendiente.");
}

#[test]
fn or_combinator_accepts_either_state() {
    let template = "\
[SI {{ticket.estado}} ES IGUAL QUE 'ABIERTO' O {{ticket.estado}} ES IGUAL QUE 'EN_PROCESO'] \
El ticket {{ticket.numero}} sigue activo. \
[FIN]\
[SINO] \
El ticket {{ticket.numero}} está terminado. \
[FIN]";

    for estado in ["ABIERTO", "EN_PROCESO"] {
        let out = render(template, &ticket_context(estado)).unwrap();
        assert_eq!(out, "El ticket 4812 sigue activo.");
    }
    let out = render(template, &ticket_context("CERRADO")).unwrap();
    assert_eq!(out, "El ticket 4812 está terminado.");
}

#[test]
fn maintenance_override_beats_every_branch() {
    // Appending a DEFAULT block is the authoring escape hatch: the rest of
    // the template stays in place but stops mattering.
    let template = format!(
        "{TICKET_TEMPLATE}[DEFAULT] Sistema en mantenimiento, disculpe las molestias. [FIN]"
    );

    for estado in ["ABIERTO", "EN_PROCESO", "CERRADO", "ARCHIVADO"] {
        let out = render(&template, &ticket_context(estado)).unwrap();
        assert_eq!(out, "Sistema en mantenimiento, disculpe las molestias.");
    }
}

#[test]
fn one_context_backs_concurrent_renders() {
    let ctx = ticket_context("ABIERTO");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| Engine::new(TICKET_TEMPLATE, &ctx).render().unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                "Hola Marta, el ticket 4812 sigue abierto."
            );
        }
    });
}

#[test]
fn templates_with_prose_between_blocks_still_render() {
    // Authors sometimes leave notes between blocks; block extraction skips
    // anything outside a marker pair.
    let template = "\
-- plantilla de bienvenida --\n\
[SI {{usuario.rol}} ES IGUAL QUE 'EMPLEADO'] Bienvenido al panel interno. [FIN]\n\
-- fin --";

    let out = render(template, &ticket_context("ABIERTO")).unwrap();
    assert_eq!(out, "Bienvenido al panel interno.");
}
