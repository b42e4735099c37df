pub mod calendar;
pub mod citas;
pub mod clientes;
pub mod dashboard_home;
pub mod facturacion;
pub mod layout;
pub mod login;
pub mod servicios;
