//! Email templates
//!
//! Registered once at mailer construction; rendered with handlebars.

pub const WELCOME: &str = r#"
<p>Bonjour {{first_name}},</p>
<p>Votre espace client vient d'être créé. Choisissez votre mot de passe pour
activer votre accès&nbsp;:</p>
<p><a href="{{recovery_url}}">Activer mon compte</a></p>
<p>L'équipe</p>
"#;

pub const PASSWORD_RECOVERY: &str = r#"
<p>Bonjour,</p>
<p>Une réinitialisation de mot de passe a été demandée pour votre compte.
Ce lien est valable une heure&nbsp;:</p>
<p><a href="{{recovery_url}}">Réinitialiser mon mot de passe</a></p>
<p>Si vous n'êtes pas à l'origine de cette demande, ignorez ce message.</p>
"#;

pub const DOCUMENT_SUBMITTED: &str = r#"
<p>Un client vient de soumettre un document.</p>
<ul>
  <li>Type&nbsp;: {{document_kind}}</li>
  <li>Client&nbsp;: {{client_email}}</li>
</ul>
"#;

pub const DOCUMENTS_VALIDATED: &str = r#"
<p>Bonjour {{first_name}},</p>
<p>Bonne nouvelle&nbsp;: vos documents d'identité ont été validés.</p>
<p>L'équipe</p>
"#;

pub const DOCUMENTS_REJECTED: &str = r#"
<p>Bonjour {{first_name}},</p>
<p>Vos documents n'ont pas pu être validés pour la raison suivante&nbsp;:</p>
<blockquote>{{reason}}</blockquote>
<p>Merci de les soumettre à nouveau depuis votre espace client.</p>
"#;
