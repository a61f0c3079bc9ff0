pub mod atividade;
